pub mod models;
pub mod options;
pub mod traits;
pub mod ytdlp;

pub use models::{MediaInfo, ResolvedTarget};
pub use options::{AudioExtraction, DownloadOptions};
pub use traits::ExtractionBackend;
pub use ytdlp::YtDlpBackend;
