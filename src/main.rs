//! Tubegrab - Video Downloader
//!
//! A small desktop downloader that collects a URL, container format,
//! download mode and destination directory, then hands the job to yt-dlp
//! and reports progress.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use iced::Application;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tubegrab::controller::{ConfirmDialog, InteractionController};
use tubegrab::extractor::{ytdlp, YtDlpBackend};
use tubegrab::gui;
use tubegrab::job::{DownloadMode, JobParameters, MediaFormat};
use tubegrab::progress::JobEvent;
use tubegrab::utils::AppSettings;

#[derive(Parser)]
struct Args {
    /// Fetch the given URL headlessly instead of starting the GUI
    #[arg(long)]
    fetch: Option<String>,

    /// Extract audio (mp3) in headless mode
    #[arg(long)]
    audio: bool,

    /// Destination directory for headless mode
    #[arg(long)]
    dest: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Check for yt-dlp
    check_ytdlp_installed();

    if let Some(url) = args.fetch {
        // Run headlessly inside a temporary Tokio runtime
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async move {
            headless_fetch(url, args.audio, args.dest).await;
        });
        return Ok(());
    }

    // Start the GUI application (synchronous entrypoint)
    gui::TubegrabApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(560.0, 500.0),
            min_size: Some(iced::Size::new(480.0, 440.0)),
            ..Default::default()
        },
        antialiasing: true,
        ..Default::default()
    })?;

    Ok(())
}

fn check_ytdlp_installed() {
    if ytdlp::find_ytdlp().is_some() {
        return;
    }

    // yt-dlp not found - warn but don't exit, allow app to launch.
    // The user will see an error when they start a download.
    eprintln!("WARNING: yt-dlp not found in PATH or common locations");
    eprintln!("The app will run, but downloads will fail.");
    eprintln!("Please install yt-dlp:");
    eprintln!("  pip install yt-dlp");
    eprintln!("  or: brew install yt-dlp");
    eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
}

/// Overwrite policy for headless runs: replace, with a notice.
struct AutoConfirm;

#[async_trait]
impl ConfirmDialog for AutoConfirm {
    async fn confirm_overwrite(&self, path: &Path) -> bool {
        eprintln!("Replacing existing file: {}", path.display());
        true
    }
}

async fn headless_fetch(url: String, audio: bool, dest: Option<PathBuf>) {
    let settings = AppSettings::load();
    let destination = dest.unwrap_or(settings.download_location);
    let mode = if audio {
        DownloadMode::Audio
    } else {
        DownloadMode::Video
    };

    let params = match JobParameters::from_form(
        &url,
        MediaFormat::Best,
        mode,
        &destination.to_string_lossy(),
    ) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let mut controller = InteractionController::new(
        YtDlpBackend::new(),
        AutoConfirm,
        tokio::runtime::Handle::current(),
    );

    println!("Fetching: {}", url);
    if !controller.start(params) {
        return;
    }

    loop {
        for event in controller.poll_events() {
            match event {
                JobEvent::StatusChanged(status) => println!("{}", status),
                JobEvent::TargetResolved { title, path } => {
                    println!("Title: {}", title);
                    println!("Target: {}", path.display());
                }
                JobEvent::Progress(fraction) => {
                    println!("Progress: {:.1}%", fraction * 100.0);
                }
                JobEvent::Finished(outcome) => {
                    println!("{}", outcome.status_text());
                    return;
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
