//! Main GUI application
//!
//! The iced shell around the interaction controller. The controller runs
//! jobs on a long-lived tokio runtime; this application drains its event
//! channel on a timer subscription, so UI state is only ever mutated here,
//! on the UI thread.

use crate::controller::InteractionController;
use crate::extractor::YtDlpBackend;
use crate::gui::dialogs::{self, NativeConfirm};
use crate::gui::{clipboard, view};
use crate::job::{DownloadMode, JobParameters, MediaFormat};
use crate::progress::JobEvent;
use crate::utils::AppSettings;
use iced::{executor, Application, Command, Element, Subscription, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::warn;

/// Main application state
pub struct TubegrabApp {
    controller: InteractionController<YtDlpBackend, NativeConfirm>,
    // Keep a long-lived runtime so worker tasks stay alive
    _runtime: Arc<Runtime>,
    settings: AppSettings,

    // Form state
    url_input: String,
    format: MediaFormat,
    mode: DownloadMode,
    destination_input: String,

    // Job state, mutated only from `update`
    job_active: bool,
    progress: f32,
    status_message: String,
    resolved_title: Option<String>,
    last_destination: Option<PathBuf>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlInputChanged(String),
    ClearUrlInput,
    PasteFromClipboard,
    FormatSelected(MediaFormat),
    ModeSelected(DownloadMode),
    DestinationChanged(String),
    BrowseDestination,
    DestinationPicked(Option<PathBuf>),

    // Actions
    DownloadPressed,
    OpenDestinationFolder,
    InputErrorDismissed,

    // Periodic drain of controller events while a job runs
    Tick,
}

impl Application for TubegrabApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: Self::Flags) -> (Self, Command<Message>) {
        let settings = AppSettings::load();

        let runtime = Arc::new(Runtime::new().expect("Failed to create tokio runtime"));

        let backend = YtDlpBackend::new();
        let status_message = if backend.is_available() {
            "Ready".to_string()
        } else {
            "yt-dlp not found. Please install yt-dlp".to_string()
        };

        let controller =
            InteractionController::new(backend, NativeConfirm, runtime.handle().clone());

        let destination_input = settings.download_location.display().to_string();

        let app = Self {
            controller,
            _runtime: runtime,
            settings,
            url_input: String::new(),
            format: MediaFormat::Best,
            mode: DownloadMode::Video,
            destination_input,
            job_active: false,
            progress: 0.0,
            status_message,
            resolved_title: None,
            last_destination: None,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Tubegrab - Video Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                Command::none()
            }

            Message::ClearUrlInput => {
                self.url_input.clear();
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::get_clipboard_content() {
                    Ok(content) => self.url_input = content.trim().to_string(),
                    Err(e) => warn!("{}", e),
                }
                Command::none()
            }

            Message::FormatSelected(format) => {
                self.format = format;
                Command::none()
            }

            Message::ModeSelected(mode) => {
                self.mode = mode;
                Command::none()
            }

            Message::DestinationChanged(destination) => {
                self.destination_input = destination;
                Command::none()
            }

            Message::BrowseDestination => {
                let start_dir = if self.destination_input.trim().is_empty() {
                    self.settings.download_location.clone()
                } else {
                    PathBuf::from(self.destination_input.trim())
                };
                Command::perform(
                    dialogs::pick_destination_folder(start_dir),
                    Message::DestinationPicked,
                )
            }

            Message::DestinationPicked(Some(path)) => {
                self.destination_input = path.display().to_string();
                Command::none()
            }
            Message::DestinationPicked(None) => Command::none(),

            Message::DownloadPressed => {
                if self.job_active || self.controller.is_job_active() {
                    return Command::none();
                }

                let params = match JobParameters::from_form(
                    &self.url_input,
                    self.format,
                    self.mode,
                    &self.destination_input,
                ) {
                    Ok(params) => params,
                    Err(e) => {
                        return Command::perform(dialogs::show_input_error(e.to_string()), |_| {
                            Message::InputErrorDismissed
                        });
                    }
                };

                // Remember the last used destination across runs.
                if self.settings.download_location != params.destination {
                    self.settings.download_location = params.destination.clone();
                    if let Err(e) = self.settings.save() {
                        warn!("Failed to persist settings: {}", e);
                    }
                }

                self.last_destination = Some(params.destination.clone());
                self.progress = 0.0;
                self.status_message.clear();
                self.resolved_title = None;

                if self.controller.start(params) {
                    self.job_active = true;
                }
                Command::none()
            }

            Message::OpenDestinationFolder => {
                if let Some(dir) = &self.last_destination {
                    if let Err(e) = open::that(dir) {
                        warn!("Failed to open {}: {}", dir.display(), e);
                    }
                }
                Command::none()
            }

            Message::InputErrorDismissed => Command::none(),

            Message::Tick => {
                for event in self.controller.poll_events() {
                    match event {
                        JobEvent::StatusChanged(status) => self.status_message = status,
                        JobEvent::TargetResolved { title, .. } => {
                            self.resolved_title = Some(title);
                        }
                        JobEvent::Progress(fraction) => self.progress = fraction as f32,
                        JobEvent::Finished(outcome) => {
                            self.status_message = outcome.status_text();
                            self.job_active = false;
                        }
                    }
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let show_open_folder =
            self.status_message == "Download Complete" && self.last_destination.is_some();

        view::main_view(
            &self.url_input,
            self.format,
            self.mode,
            &self.destination_input,
            self.progress,
            &self.status_message,
            self.resolved_title.as_deref(),
            self.job_active,
            show_open_folder,
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        // Poll the controller channel only while a job is in flight; the
        // flag is cleared when the terminal event has been drained, so no
        // event is left behind.
        if self.job_active {
            iced::time::every(Duration::from_millis(100)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
