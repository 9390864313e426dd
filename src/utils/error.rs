//! Error handling for Tubegrab
//!
//! Failures are split by the stage they occur in: form validation,
//! metadata resolution, and the actual retrieval. Fetch failures never
//! leave the extraction client as errors; they are folded into a
//! `JobOutcome::Failed` before the controller sees them.

use thiserror::Error;

/// Form-level validation failure. Raised before any backend call; surfaced
/// as a modal dialog and never starts a job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a video URL.")]
    EmptyUrl,

    #[error("Please select a directory to save the file.")]
    EmptyDestination,
}

/// Metadata-only resolution failure (unreachable URL, private or removed
/// media, unsupported site, or no usable backend).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    BackendMissing,

    #[error("Failed to launch yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{0}")]
    Backend(String),

    #[error("yt-dlp did not report a target file path")]
    MissingTarget,

    #[error("Failed to parse yt-dlp metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Retrieval failure inside the extraction client. Internal only: `fetch`
/// converts this into `JobOutcome::Failed(reason)` at the boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    BackendMissing,

    #[error("Failed to launch yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{0}")]
    Backend(String),
}
