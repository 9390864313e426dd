use crate::extractor::models::ResolvedTarget;
use crate::extractor::options::DownloadOptions;
use crate::job::JobOutcome;
use crate::progress::ProgressEvent;
use crate::utils::error::ResolveError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Seam between the interaction controller and the extraction backend.
///
/// Isolates the application from the concrete extraction method so the
/// controller can be exercised against a mock in tests.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Unique identifier for this backend (e.g. "yt-dlp").
    fn id(&self) -> &'static str;

    /// Metadata-only resolution: predicts the final file path without
    /// fetching any media bytes. Used for the pre-flight overwrite check.
    async fn resolve_target(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<ResolvedTarget, ResolveError>;

    /// Perform the actual retrieval (and any postprocessing), reporting
    /// raw progress through `progress`.
    ///
    /// Never returns an error across this boundary: every failure is
    /// folded into `JobOutcome::Failed(reason)`.
    async fn fetch(
        &self,
        url: &str,
        options: &DownloadOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> JobOutcome;
}
