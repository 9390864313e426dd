//! Tubegrab library

pub mod controller;
pub mod extractor;
pub mod gui;
pub mod job;
pub mod progress;
pub mod utils;

// Re-export main types for easier use
pub use controller::{ConfirmDialog, InteractionController};
pub use extractor::{DownloadOptions, ExtractionBackend, ResolvedTarget, YtDlpBackend};
pub use gui::{Message, TubegrabApp};
pub use job::{DownloadMode, JobOutcome, JobParameters, MediaFormat};
pub use progress::{JobEvent, ProgressEvent, ProgressRelay};
pub use utils::{AppSettings, InputError, ResolveError};
