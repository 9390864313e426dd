//! yt-dlp adapter
//!
//! Thin client around the yt-dlp executable. It renders `DownloadOptions`
//! into command-line arguments, performs metadata-only target resolution,
//! and drives the actual retrieval while parsing machine-readable progress
//! lines from stdout.

use crate::extractor::models::{MediaInfo, ResolvedTarget};
use crate::extractor::options::DownloadOptions;
use crate::job::JobOutcome;
use crate::progress::ProgressEvent;
use crate::utils::error::{FetchError, ResolveError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Sentinel prefix on progress lines; keeps them distinguishable from the
/// rest of yt-dlp's stdout chatter.
const PROGRESS_PREFIX: &str = "progress:";

/// Progress template handed to yt-dlp: one line per tick,
/// `progress:<downloaded>/<total>` with "NA" for unknown fields.
const PROGRESS_TEMPLATE: &str =
    "download:progress:%(progress.downloaded_bytes)s/%(progress.total_bytes)s";

/// Extraction backend driving the yt-dlp executable.
pub struct YtDlpBackend {
    ytdlp_path: Option<PathBuf>,
}

impl YtDlpBackend {
    /// Locate yt-dlp on this machine. The backend is still usable when the
    /// binary is missing; resolution and fetch then report the absence as
    /// ordinary job failures instead of crashing the app.
    pub fn new() -> Self {
        Self {
            ytdlp_path: find_ytdlp(),
        }
    }

    /// Use an explicit yt-dlp binary, bypassing discovery.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            ytdlp_path: Some(path),
        }
    }

    pub fn is_available(&self) -> bool {
        self.ytdlp_path.is_some()
    }

    async fn run_fetch(
        &self,
        url: &str,
        options: &DownloadOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> Result<(), FetchError> {
        let ytdlp = self.ytdlp_path.as_ref().ok_or(FetchError::BackendMissing)?;

        debug!("Fetching {} via {}", url, ytdlp.display());

        let mut child = AsyncCommand::new(ytdlp)
            .args(options.to_args())
            .arg("--newline")
            .arg("--no-warnings")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .spawn()?;

        // Drain stderr concurrently so the child never blocks on a full pipe.
        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut collected = String::new();
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    collected.push_str(&line);
                    collected.push('\n');
                }
            }
            collected
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if let Some(event) = parse_progress_line(&line) {
                    // The receiver may already be gone; progress is best-effort.
                    let _ = progress.send(event).await;
                }
            }
        }

        let status = child.wait().await?;
        let stderr_text = stderr_task.await.unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            Err(FetchError::Backend(error_message(&stderr_text)))
        }
    }
}

impl Default for YtDlpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl crate::extractor::ExtractionBackend for YtDlpBackend {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    /// Metadata-only run: `--dump-json` with the job's option arguments.
    /// yt-dlp fills `_filename` from the output template, which is the
    /// path the overwrite pre-flight inspects.
    async fn resolve_target(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<ResolvedTarget, ResolveError> {
        let ytdlp = self
            .ytdlp_path
            .as_ref()
            .ok_or(ResolveError::BackendMissing)?;

        debug!("Resolving target for {}", url);

        let mut command = AsyncCommand::new(ytdlp);
        command
            .args(options.to_args())
            .arg("--dump-json")
            .arg("--no-warnings");
        if options.playlist_enabled {
            // One representative entry is enough for the pre-flight check.
            command.arg("--playlist-items").arg("1");
        }

        let output = command.arg(url).stdin(Stdio::null()).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResolveError::Backend(error_message(&stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or(ResolveError::MissingTarget)?;

        let info: MediaInfo = serde_json::from_str(line)?;
        let path = info.filename.ok_or(ResolveError::MissingTarget)?;

        Ok(ResolvedTarget {
            title: info.title,
            path: PathBuf::from(path),
        })
    }

    async fn fetch(
        &self,
        url: &str,
        options: &DownloadOptions,
        progress: mpsc::Sender<ProgressEvent>,
    ) -> JobOutcome {
        match self.run_fetch(url, options, progress).await {
            Ok(()) => {
                info!("Fetch completed for {}", url);
                JobOutcome::Completed
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                JobOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Parse one `--progress-template` stdout line.
///
/// "NA" totals map to 0 (unknown); lines without a downloaded byte count
/// are ignored.
fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    let (downloaded, total) = rest.split_once('/')?;

    let downloaded_bytes = parse_byte_field(downloaded)?;
    let total_bytes = parse_byte_field(total).unwrap_or(0);

    Some(ProgressEvent {
        downloaded_bytes,
        total_bytes,
    })
}

/// yt-dlp renders unknown numeric fields as "NA"; byte counts may also
/// come through as floats.
fn parse_byte_field(field: &str) -> Option<u64> {
    let field = field.trim();
    if field.is_empty() || field == "NA" {
        return None;
    }
    field
        .parse::<u64>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().map(|v| v.max(0.0) as u64))
}

/// Reduce yt-dlp's stderr to a single displayable reason: the last
/// ERROR-tagged line when present, the last non-empty line otherwise.
fn error_message(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let message = lines
        .iter()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.trim_start_matches("ERROR:").trim())
        .unwrap_or("yt-dlp exited with an error");

    message.to_string()
}

// ============================================================
// yt-dlp Detection
// ============================================================

/// Find the yt-dlp binary: system PATH first, then common install
/// locations.
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        info!("Using yt-dlp from PATH: {}", path.display());
        return Some(path);
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp",
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            }
        } else {
            PathBuf::from(path_str)
        };

        if expanded.is_file() && is_executable(&expanded) {
            info!("Using yt-dlp from common path: {}", expanded.display());
            return Some(expanded);
        }
    }

    warn!("yt-dlp not found anywhere");
    None
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}
