//! Interaction controller
//!
//! Toolkit-free form logic: drives resolve → overwrite confirmation →
//! fetch on a worker task and publishes `JobEvent`s that the presentation
//! layer drains on its own thread. One job may be in flight at a time;
//! further start requests are refused until the current job terminates.

use crate::extractor::{DownloadOptions, ExtractionBackend};
use crate::job::{JobOutcome, JobParameters};
use crate::progress::{JobEvent, ProgressRelay};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Modal confirmation capability the controller needs from the
/// presentation layer.
#[async_trait]
pub trait ConfirmDialog: Send + Sync {
    /// Ask whether an existing file at `path` may be replaced.
    async fn confirm_overwrite(&self, path: &Path) -> bool;
}

/// Owns the lifecycle of a single download attempt at a time.
pub struct InteractionController<B, D> {
    backend: Arc<B>,
    dialogs: Arc<D>,
    runtime: Handle,
    events_tx: mpsc::UnboundedSender<JobEvent>,
    events_rx: mpsc::UnboundedReceiver<JobEvent>,
    job_active: Arc<AtomicBool>,
}

impl<B, D> InteractionController<B, D>
where
    B: ExtractionBackend + 'static,
    D: ConfirmDialog + 'static,
{
    pub fn new(backend: B, dialogs: D, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            backend: Arc::new(backend),
            dialogs: Arc::new(dialogs),
            runtime,
            events_tx,
            events_rx,
            job_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Hand a validated job to a worker task and return immediately.
    ///
    /// Returns `false` without starting anything when a job is already in
    /// flight; the caller should keep the download action disabled in that
    /// state anyway.
    pub fn start(&self, params: JobParameters) -> bool {
        if self.job_active.swap(true, Ordering::SeqCst) {
            debug!("Ignoring start request: a job is already in flight");
            return false;
        }

        info!("Starting job for {}", params.url);

        let backend = Arc::clone(&self.backend);
        let dialogs = Arc::clone(&self.dialogs);
        let events = self.events_tx.clone();
        let job_active = Arc::clone(&self.job_active);

        self.runtime
            .spawn(run_job(backend, dialogs, params, events, job_active));

        true
    }

    /// Drain pending job events. Called from the UI thread, which is the
    /// only place UI state may change.
    pub fn poll_events(&mut self) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn is_job_active(&self) -> bool {
        self.job_active.load(Ordering::SeqCst)
    }
}

/// One complete job: Resolving → (Cancelled | Fetching) →
/// (Completed | Failed). Exactly one terminal event is published and the
/// in-flight flag is cleared before it goes out.
async fn run_job<B, D>(
    backend: Arc<B>,
    dialogs: Arc<D>,
    params: JobParameters,
    events: mpsc::UnboundedSender<JobEvent>,
    job_active: Arc<AtomicBool>,
) where
    B: ExtractionBackend,
    D: ConfirmDialog,
{
    let mut relay = ProgressRelay::new(events.clone());
    let options = DownloadOptions::build(&params);

    let target = match backend.resolve_target(&params.url, &options).await {
        Ok(target) => target,
        Err(e) => {
            job_active.store(false, Ordering::SeqCst);
            relay.finish(JobOutcome::Failed(e.to_string()));
            return;
        }
    };

    let _ = events.send(JobEvent::TargetResolved {
        title: target.title.clone(),
        path: target.path.clone(),
    });

    if target.path.exists() && !dialogs.confirm_overwrite(&target.path).await {
        // Declined: nothing is fetched and no partial file is touched.
        job_active.store(false, Ordering::SeqCst);
        relay.finish(JobOutcome::Cancelled);
        return;
    }

    let _ = events.send(JobEvent::StatusChanged("Downloading...".to_string()));

    let (raw_tx, mut raw_rx) = mpsc::channel(64);
    let fetch = backend.fetch(&params.url, &options, raw_tx);
    let forward = async {
        while let Some(event) = raw_rx.recv().await {
            relay.on_raw_progress(event);
        }
    };
    let (outcome, ()) = tokio::join!(fetch, forward);

    job_active.store(false, Ordering::SeqCst);
    relay.finish(outcome);
}
