//! Backend option building
//!
//! `DownloadOptions` is the deterministic mapping from job parameters to
//! the configuration handed to yt-dlp. One options value is built per job
//! and owned by the invocation that created it.

use crate::job::{DownloadMode, JobParameters};

/// Codec and quality applied when extracting audio.
pub const AUDIO_CODEC: &str = "mp3";
pub const AUDIO_QUALITY: &str = "192K";

/// Audio-extraction postprocessing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioExtraction {
    pub codec: String,
    pub quality: String,
}

impl AudioExtraction {
    fn preferred() -> Self {
        Self {
            codec: AUDIO_CODEC.to_string(),
            quality: AUDIO_QUALITY.to_string(),
        }
    }
}

/// Library-specific download configuration derived from `JobParameters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// yt-dlp format selector.
    pub format: String,
    /// Output path template: `{destination}/%(title)s.%(ext)s`.
    pub output_template: String,
    /// Audio postprocessing, present only in audio mode.
    pub audio_extraction: Option<AudioExtraction>,
    /// Whether playlist traversal is enabled.
    pub playlist_enabled: bool,
}

impl DownloadOptions {
    /// Pure mapping from job parameters.
    ///
    /// Audio mode forces the best available audio stream regardless of the
    /// selected container format and attaches the mp3 extraction step.
    pub fn build(params: &JobParameters) -> Self {
        let output_template = format!("{}/%(title)s.%(ext)s", params.destination.display());

        match params.mode {
            DownloadMode::Audio => Self {
                format: "bestaudio/best".to_string(),
                output_template,
                audio_extraction: Some(AudioExtraction::preferred()),
                playlist_enabled: false,
            },
            DownloadMode::Playlist => Self {
                format: params.format.selector().to_string(),
                output_template,
                audio_extraction: None,
                playlist_enabled: true,
            },
            DownloadMode::Video => Self {
                format: params.format.selector().to_string(),
                output_template,
                audio_extraction: None,
                playlist_enabled: false,
            },
        }
    }

    /// Render the equivalent yt-dlp command-line arguments.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.clone(),
        ];

        if self.playlist_enabled {
            args.push("--yes-playlist".to_string());
        } else {
            args.push("--no-playlist".to_string());
        }

        if let Some(audio) = &self.audio_extraction {
            args.push("-x".to_string());
            args.push("--audio-format".to_string());
            args.push(audio.codec.clone());
            args.push("--audio-quality".to_string());
            args.push(audio.quality.clone());
        }

        args
    }
}
