//! End-to-end controller flows against a scripted backend, without
//! touching the network or a real yt-dlp binary.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tubegrab::controller::{ConfirmDialog, InteractionController};
use tubegrab::extractor::{DownloadOptions, ExtractionBackend, ResolvedTarget};
use tubegrab::job::{DownloadMode, JobOutcome, JobParameters, MediaFormat};
use tubegrab::progress::{JobEvent, ProgressEvent};
use tubegrab::utils::error::ResolveError;

/// Backend with a scripted resolution result, progress trace and outcome.
#[derive(Clone)]
struct ScriptedBackend {
    resolve_error: Option<String>,
    target: ResolvedTarget,
    events: Vec<ProgressEvent>,
    outcome: JobOutcome,
    resolve_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    fn completing(target_path: PathBuf) -> Self {
        Self {
            resolve_error: None,
            target: ResolvedTarget {
                title: "Sample Video".to_string(),
                path: target_path,
            },
            events: vec![
                ProgressEvent {
                    downloaded_bytes: 250,
                    total_bytes: 1000,
                },
                ProgressEvent {
                    downloaded_bytes: 1000,
                    total_bytes: 1000,
                },
            ],
            outcome: JobOutcome::Completed,
            resolve_calls: Arc::new(AtomicUsize::new(0)),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(target_path: PathBuf, reason: &str) -> Self {
        Self {
            events: vec![ProgressEvent {
                downloaded_bytes: 600,
                total_bytes: 1000,
            }],
            outcome: JobOutcome::Failed(reason.to_string()),
            ..Self::completing(target_path)
        }
    }

    fn unresolvable(reason: &str) -> Self {
        Self {
            resolve_error: Some(reason.to_string()),
            ..Self::completing(PathBuf::from("/nonexistent/never.mp4"))
        }
    }
}

#[async_trait]
impl ExtractionBackend for ScriptedBackend {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn resolve_target(
        &self,
        _url: &str,
        _options: &DownloadOptions,
    ) -> Result<ResolvedTarget, ResolveError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        match &self.resolve_error {
            Some(reason) => Err(ResolveError::Backend(reason.clone())),
            None => Ok(self.target.clone()),
        }
    }

    async fn fetch(
        &self,
        _url: &str,
        _options: &DownloadOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> JobOutcome {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        for event in &self.events {
            progress.send(*event).await.expect("progress receiver alive");
        }
        self.outcome.clone()
    }
}

/// Confirmation dialog with a canned answer.
#[derive(Clone)]
struct ScriptedConfirm {
    answer: bool,
    asked: Arc<AtomicBool>,
}

impl ScriptedConfirm {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl ConfirmDialog for ScriptedConfirm {
    async fn confirm_overwrite(&self, _path: &Path) -> bool {
        self.asked.store(true, Ordering::SeqCst);
        self.answer
    }
}

fn sample_params(destination: &Path) -> JobParameters {
    JobParameters::from_form(
        "https://example.com/v1",
        MediaFormat::Mp4,
        DownloadMode::Video,
        &destination.to_string_lossy(),
    )
    .expect("valid form input")
}

/// Drain controller events until the terminal one arrives.
async fn collect_until_finished(
    controller: &mut InteractionController<ScriptedBackend, ScriptedConfirm>,
) -> Vec<JobEvent> {
    let mut events = Vec::new();
    for _ in 0..200 {
        for event in controller.poll_events() {
            let finished = matches!(event, JobEvent::Finished(_));
            events.push(event);
            if finished {
                return events;
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job did not finish; events so far: {:?}", events);
}

fn statuses(events: &[JobEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            JobEvent::StatusChanged(status) => Some(status.clone()),
            JobEvent::Finished(outcome) => Some(outcome.status_text()),
            _ => None,
        })
        .collect()
}

fn fractions(events: &[JobEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|event| match event {
            JobEvent::Progress(fraction) => Some(*fraction),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn fresh_target_downloads_to_completion() {
    let temp = TempDir::new().expect("temp dir");
    let backend = ScriptedBackend::completing(temp.path().join("Sample Video.mp4"));
    let dialogs = ScriptedConfirm::answering(false);

    let mut controller = InteractionController::new(
        backend.clone(),
        dialogs.clone(),
        tokio::runtime::Handle::current(),
    );

    assert!(controller.start(sample_params(temp.path())));
    let events = collect_until_finished(&mut controller).await;

    assert_eq!(
        statuses(&events),
        vec!["Downloading...", "Download Complete"]
    );
    assert_eq!(fractions(&events).last(), Some(&1.0));
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 1);
    // Target did not exist, so no overwrite prompt.
    assert!(!dialogs.asked.load(Ordering::SeqCst));
    assert!(!controller.is_job_active());
}

#[tokio::test]
async fn declined_overwrite_cancels_before_fetch() {
    let temp = TempDir::new().expect("temp dir");
    let existing = temp.path().join("Sample Video.mp4");
    std::fs::write(&existing, b"previous download").expect("seed existing file");

    let backend = ScriptedBackend::completing(existing);
    let dialogs = ScriptedConfirm::answering(false);

    let mut controller = InteractionController::new(
        backend.clone(),
        dialogs.clone(),
        tokio::runtime::Handle::current(),
    );

    assert!(controller.start(sample_params(temp.path())));
    let events = collect_until_finished(&mut controller).await;

    assert_eq!(statuses(&events), vec!["Download Cancelled"]);
    assert!(dialogs.asked.load(Ordering::SeqCst));
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn accepted_overwrite_proceeds_to_fetch() {
    let temp = TempDir::new().expect("temp dir");
    let existing = temp.path().join("Sample Video.mp4");
    std::fs::write(&existing, b"previous download").expect("seed existing file");

    let backend = ScriptedBackend::completing(existing);
    let dialogs = ScriptedConfirm::answering(true);

    let mut controller = InteractionController::new(
        backend.clone(),
        dialogs.clone(),
        tokio::runtime::Handle::current(),
    );

    assert!(controller.start(sample_params(temp.path())));
    let events = collect_until_finished(&mut controller).await;

    assert!(dialogs.asked.load(Ordering::SeqCst));
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        statuses(&events),
        vec!["Downloading...", "Download Complete"]
    );
}

#[tokio::test]
async fn fetch_failure_reports_error_and_keeps_progress() {
    let temp = TempDir::new().expect("temp dir");
    let backend = ScriptedBackend::failing(
        temp.path().join("Sample Video.mp4"),
        "Network timeout",
    );
    let dialogs = ScriptedConfirm::answering(true);

    let mut controller = InteractionController::new(
        backend.clone(),
        dialogs,
        tokio::runtime::Handle::current(),
    );

    assert!(controller.start(sample_params(temp.path())));
    let events = collect_until_finished(&mut controller).await;

    assert_eq!(
        statuses(&events),
        vec!["Downloading...", "Error: Network timeout"]
    );
    // Bar stays at the last reported value; no forced 100%.
    assert_eq!(fractions(&events), vec![0.6]);

    // The form is reusable after a failure.
    assert!(!controller.is_job_active());
    assert!(controller.start(sample_params(temp.path())));
    let events = collect_until_finished(&mut controller).await;
    assert!(!statuses(&events).is_empty());
}

#[tokio::test]
async fn resolution_failure_stops_before_fetch() {
    let temp = TempDir::new().expect("temp dir");
    let backend = ScriptedBackend::unresolvable("Video unavailable");
    let dialogs = ScriptedConfirm::answering(true);

    let mut controller = InteractionController::new(
        backend.clone(),
        dialogs.clone(),
        tokio::runtime::Handle::current(),
    );

    assert!(controller.start(sample_params(temp.path())));
    let events = collect_until_finished(&mut controller).await;

    assert_eq!(statuses(&events), vec!["Error: Video unavailable"]);
    assert_eq!(backend.resolve_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
    assert!(!dialogs.asked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn invalid_form_input_never_reaches_the_backend() {
    let temp = TempDir::new().expect("temp dir");
    let backend = ScriptedBackend::completing(temp.path().join("Sample Video.mp4"));
    let dialogs = ScriptedConfirm::answering(true);

    let controller = InteractionController::new(
        backend.clone(),
        dialogs,
        tokio::runtime::Handle::current(),
    );

    // The form constructs parameters before the controller is involved;
    // a validation failure means no job is ever started.
    let result = JobParameters::from_form(
        "",
        MediaFormat::Best,
        DownloadMode::Video,
        &temp.path().to_string_lossy(),
    );
    assert!(result.is_err());

    let result =
        JobParameters::from_form("https://example.com/v1", MediaFormat::Best, DownloadMode::Video, "");
    assert!(result.is_err());

    assert_eq!(backend.resolve_calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.fetch_calls.load(Ordering::SeqCst), 0);
    assert!(!controller.is_job_active());
}
