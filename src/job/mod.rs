//! Job parameters captured from the form
//!
//! One `JobParameters` is built per download attempt from the raw form
//! state. It is immutable once handed to the extraction client and
//! discarded when the job terminates.

use crate::utils::error::InputError;
use path_absolutize::Absolutize;
use std::fmt;
use std::path::PathBuf;

/// Container format choices offered by the format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Best,
    Mp4,
    Webm,
    Mkv,
    Flv,
}

impl MediaFormat {
    pub const ALL: [MediaFormat; 5] = [
        MediaFormat::Best,
        MediaFormat::Mp4,
        MediaFormat::Webm,
        MediaFormat::Mkv,
        MediaFormat::Flv,
    ];

    /// The yt-dlp format selector string for this choice.
    pub fn selector(&self) -> &'static str {
        match self {
            MediaFormat::Best => "best",
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Webm => "webm",
            MediaFormat::Mkv => "mkv",
            MediaFormat::Flv => "flv",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Download mode: mutually exclusive, selected via the radio group.
///
/// Playlist traverses every entry with the selected container format;
/// audio extraction applies only in `Audio` mode, so a combined
/// audio+playlist job is not expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    Video,
    Audio,
    Playlist,
}

impl DownloadMode {
    pub const ALL: [DownloadMode; 3] = [
        DownloadMode::Video,
        DownloadMode::Audio,
        DownloadMode::Playlist,
    ];
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DownloadMode::Video => "Video",
            DownloadMode::Audio => "Audio",
            DownloadMode::Playlist => "Playlist",
        };
        f.write_str(label)
    }
}

/// Immutable record of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobParameters {
    pub url: String,
    pub format: MediaFormat,
    pub mode: DownloadMode,
    pub destination: PathBuf,
}

impl JobParameters {
    /// Build parameters from raw form state.
    ///
    /// Only the free-text fields are validated; format and mode come from
    /// closed selectors and are always valid by construction. The
    /// destination is absolutized so relative entries behave predictably.
    pub fn from_form(
        url: &str,
        format: MediaFormat,
        mode: DownloadMode,
        destination: &str,
    ) -> Result<Self, InputError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(InputError::EmptyUrl);
        }

        let destination = destination.trim();
        if destination.is_empty() {
            return Err(InputError::EmptyDestination);
        }

        let destination = PathBuf::from(destination);
        let destination = match destination.absolutize() {
            Ok(absolute) => absolute.into_owned(),
            Err(_) => destination,
        };

        Ok(Self {
            url: url.to_string(),
            format,
            mode,
            destination,
        })
    }
}

/// Terminal result of a job. Produced exactly once; no progress events
/// follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Cancelled,
    Failed(String),
}

impl JobOutcome {
    /// The status line shown for this outcome.
    pub fn status_text(&self) -> String {
        match self {
            JobOutcome::Completed => "Download Complete".to_string(),
            JobOutcome::Cancelled => "Download Cancelled".to_string(),
            JobOutcome::Failed(reason) => format!("Error: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_rejected() {
        let result = JobParameters::from_form("", MediaFormat::Best, DownloadMode::Video, "/tmp");
        assert_eq!(result.unwrap_err(), InputError::EmptyUrl);

        let result =
            JobParameters::from_form("   ", MediaFormat::Best, DownloadMode::Video, "/tmp");
        assert_eq!(result.unwrap_err(), InputError::EmptyUrl);
    }

    #[test]
    fn test_empty_destination_is_rejected() {
        let result = JobParameters::from_form(
            "https://example.com/v1",
            MediaFormat::Mp4,
            DownloadMode::Video,
            "",
        );
        assert_eq!(result.unwrap_err(), InputError::EmptyDestination);
    }

    #[test]
    fn test_valid_form_builds_parameters() {
        let params = JobParameters::from_form(
            " https://example.com/v1 ",
            MediaFormat::Mp4,
            DownloadMode::Playlist,
            "/tmp/out",
        )
        .unwrap();

        assert_eq!(params.url, "https://example.com/v1");
        assert_eq!(params.format, MediaFormat::Mp4);
        assert_eq!(params.mode, DownloadMode::Playlist);
        assert_eq!(params.destination, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_relative_destination_is_absolutized() {
        let params = JobParameters::from_form(
            "https://example.com/v1",
            MediaFormat::Best,
            DownloadMode::Video,
            "downloads",
        )
        .unwrap();

        assert!(params.destination.is_absolute());
        assert!(params.destination.ends_with("downloads"));
    }

    #[test]
    fn test_outcome_status_text() {
        assert_eq!(JobOutcome::Completed.status_text(), "Download Complete");
        assert_eq!(JobOutcome::Cancelled.status_text(), "Download Cancelled");
        assert_eq!(
            JobOutcome::Failed("Network timeout".to_string()).status_text(),
            "Error: Network timeout"
        );
    }
}
