//! Progress normalization and UI-thread marshaling
//!
//! The extraction backend reports raw byte counts from whatever context it
//! runs in. The relay turns those into 0.0–1.0 fractions and republishes
//! them over a channel that the GUI drains on its own thread, so nothing
//! but the UI thread ever touches UI state.

use crate::job::JobOutcome;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Raw progress report from the extraction backend.
///
/// `total_bytes == 0` means the total is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub downloaded_bytes: u64,
    pub total_bytes: u64,
}

/// Event published to the UI layer for one job.
///
/// For a given job: zero or more `Progress` values in non-decreasing
/// order, then exactly one `Finished`, and nothing after it.
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// Status line change (e.g. "Downloading...").
    StatusChanged(String),
    /// The pre-flight resolution produced a title and predicted path.
    TargetResolved { title: String, path: PathBuf },
    /// Normalized completion fraction in [0.0, 1.0].
    Progress(f64),
    /// Terminal outcome; the job is over.
    Finished(JobOutcome),
}

/// Normalizes raw progress and forwards it to the UI channel.
pub struct ProgressRelay {
    events: mpsc::UnboundedSender<JobEvent>,
    last_fraction: f64,
}

impl ProgressRelay {
    pub fn new(events: mpsc::UnboundedSender<JobEvent>) -> Self {
        Self {
            events,
            last_fraction: 0.0,
        }
    }

    /// Handle one raw progress report.
    ///
    /// Unknown-total reports are suppressed rather than producing a bogus
    /// percentage. Emitted fractions are clamped to [0, 1] and never
    /// regress, even if the backend misbehaves.
    pub fn on_raw_progress(&mut self, event: ProgressEvent) {
        if event.total_bytes == 0 {
            return;
        }

        let fraction =
            (event.downloaded_bytes as f64 / event.total_bytes as f64).clamp(0.0, 1.0);
        if fraction < self.last_fraction {
            return;
        }

        self.last_fraction = fraction;
        let _ = self.events.send(JobEvent::Progress(fraction));
    }

    /// Publish the terminal outcome.
    ///
    /// On `Completed` a final 100% update is forced first, covering
    /// backends that omit a closing progress tick. Failures leave the bar
    /// at the last reported value.
    pub fn finish(&mut self, outcome: JobOutcome) {
        if outcome == JobOutcome::Completed {
            self.last_fraction = 1.0;
            let _ = self.events.send(JobEvent::Progress(1.0));
        }
        let _ = self.events.send(JobEvent::Finished(outcome));
    }
}
