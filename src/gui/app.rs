//! Main GUI application

use crate::backend::{BackendActor, BackendCommand, BackendEvent};
use crate::catalogue::StreamCatalogueResult;
use crate::controller::InteractionController;
use crate::downloader::Outcome;
use crate::gui::components::{console_id, StreamChoices, StreamOption};
use crate::gui::views::{main_view, Controls};
use crate::gui::{clipboard, notify, theme};
use crate::selection::resolve;
use crate::utils::config::{AppSettings, SelectionMode};
use crate::utils::error::GrabError;
use iced::widget::{container, scrollable};
use iced::{Application, Command, Element, Length, Subscription, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Capacity of the GUI <-> backend channels
const CHANNEL_CAPACITY: usize = 256;

/// Channel ends held by the GUI while the backend actor runs
struct BackendLink {
    commands: mpsc::Sender<BackendCommand>,
    events: mpsc::Receiver<BackendEvent>,
}

/// Main application state
pub struct GrabberApp {
    // Keep a long-lived runtime so backend tasks stay alive
    _runtime: Arc<Runtime>,
    /// Missing when yt-dlp could not be located at startup
    backend: Result<BackendLink, GrabError>,
    controller: InteractionController,

    // UI State
    url_input: String,
    selection_mode: SelectionMode,
    choices: StreamChoices,
    destination: String,
    console_lines: Vec<String>,
    status_message: String,
    /// Directory of the last successful download
    completed_directory: Option<PathBuf>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Source
    UrlInputChanged(String),
    PasteFromClipboard,
    ClearUrlInput,
    FetchPressed,

    // Selection
    SelectionModeChanged(SelectionMode),
    SingleStreamSelected(StreamOption),
    VideoStreamSelected(StreamOption),
    AudioStreamSelected(StreamOption),
    WantVideoToggled(bool),
    WantAudioToggled(bool),

    // Destination and download
    DestinationChanged(String),
    BrowseDestination,
    DownloadPressed,
    OpenDownloadFolder,

    // System
    Tick, // Drains backend events
}

impl Application for GrabberApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppSettings;

    fn new(settings: Self::Flags) -> (Self, Command<Message>) {
        let runtime = Arc::new(Runtime::new().expect("Failed to create tokio runtime"));

        let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let backend = match BackendActor::new(&settings, command_rx, event_tx) {
            Ok(actor) => {
                runtime.spawn(actor.run());
                Ok(BackendLink {
                    commands: command_tx,
                    events: event_rx,
                })
            }
            Err(e) => {
                error!("Backend unavailable: {}", e);
                Err(e)
            }
        };

        let status_message = match &backend {
            Ok(_) => "Ready".to_string(),
            Err(e) => e.to_string(),
        };

        let app = Self {
            _runtime: runtime,
            backend,
            controller: InteractionController::new(),
            url_input: String::new(),
            selection_mode: settings.selection_mode,
            choices: StreamChoices::default(),
            destination: settings
                .download_location
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            console_lines: Vec::new(),
            status_message,
            completed_directory: None,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("TubeGrab - YouTube Stream Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::get_clipboard_content() {
                    Ok(content) => {
                        self.url_input = content;
                        self.status_message = "URL pasted from clipboard".to_string();
                    }
                    Err(e) => {
                        warn!("{}", e);
                        self.status_message = e;
                    }
                }
                Command::none()
            }

            Message::ClearUrlInput => {
                self.url_input.clear();
                Command::none()
            }

            Message::FetchPressed => {
                self.start_fetch();
                Command::none()
            }

            Message::SelectionModeChanged(mode) => {
                if self.controller.can_fetch() {
                    debug!("Selection mode -> {}", mode.as_str());
                    self.selection_mode = mode;
                }
                Command::none()
            }

            Message::SingleStreamSelected(option) => {
                if self.controller.can_edit_selection() {
                    self.choices.single = Some(option);
                }
                Command::none()
            }

            Message::VideoStreamSelected(option) => {
                if self.controller.can_edit_selection() {
                    self.choices.video_pick = Some(option);
                }
                Command::none()
            }

            Message::AudioStreamSelected(option) => {
                if self.controller.can_edit_selection() {
                    self.choices.audio_pick = Some(option);
                }
                Command::none()
            }

            Message::WantVideoToggled(checked) => {
                self.choices.set_want_video(checked, &self.controller);
                Command::none()
            }

            Message::WantAudioToggled(checked) => {
                self.choices.set_want_audio(checked, &self.controller);
                Command::none()
            }

            Message::DestinationChanged(path) => {
                self.destination = path;
                Command::none()
            }

            Message::BrowseDestination => {
                let mut dialog = rfd::FileDialog::new().set_title("Select download folder");
                let current = PathBuf::from(self.destination.trim());
                if current.is_dir() {
                    dialog = dialog.set_directory(current);
                }
                if let Some(path) = dialog.pick_folder() {
                    self.destination = path.to_string_lossy().to_string();
                }
                Command::none()
            }

            Message::DownloadPressed => {
                self.start_download();
                Command::none()
            }

            Message::OpenDownloadFolder => {
                if let Some(folder) = &self.completed_directory {
                    if let Err(e) = open::that(folder) {
                        warn!("Failed to open folder {:?}: {}", folder, e);
                        self.status_message = format!("Failed to open folder: {}", e);
                    }
                }
                Command::none()
            }

            Message::Tick => {
                if self.drain_backend_events() {
                    scrollable::snap_to(console_id(), scrollable::RelativeOffset::END)
                } else {
                    Command::none()
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let content = main_view(
            &self.url_input,
            self.controller.catalogue().map(|c| c.title.as_str()),
            self.selection_mode,
            &self.choices,
            &self.destination,
            &self.console_lines,
            &self.status_message,
            Controls::from_controller(&self.controller),
            self.completed_directory.is_some() && !self.controller.is_fetching(),
        );

        container(container(content).max_width(960).padding(24))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .style(iced::theme::Container::Custom(Box::new(
                theme::WindowBackground,
            )))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(100)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl GrabberApp {
    fn start_fetch(&mut self) {
        let url = self.url_input.trim().to_string();
        if url.is_empty() {
            notify::error(&GrabError::input("Please enter a URL"));
            return;
        }
        if let Err(e) = self.controller.begin_fetch() {
            debug!("Fetch ignored: {}", e);
            return;
        }

        if let Err(e) = self.send(BackendCommand::Fetch { url }) {
            let _ = self.controller.finish_fetch(Err(e.clone()));
            notify::error(&e);
        }
    }

    fn start_download(&mut self) {
        let Some(catalogue) = self.controller.catalogue() else {
            notify::error(&GrabError::input("Please fetch video info first"));
            return;
        };

        let destination = PathBuf::from(self.destination.trim());
        let selection = self.choices.selection(self.selection_mode);
        let directive = match resolve(catalogue, &selection, Some(&destination)) {
            Ok(directive) => directive,
            Err(e) => {
                notify::error(&e);
                return;
            }
        };

        if let Err(e) = self.controller.begin_download(directive.clone()) {
            debug!("Download ignored: {}", e);
            return;
        }

        info!(
            "Dispatching download {} -> {:?}",
            directive.format_expression, directive.destination_directory
        );
        self.completed_directory = None;
        self.status_message = "Downloading...".to_string();
        if let Err(e) = self.send(BackendCommand::Download(directive)) {
            self.controller
                .finish_download(&Outcome::Failure(e.to_string()));
            self.status_message = "Ready".to_string();
            notify::error(&e);
        }
    }

    fn send(&self, command: BackendCommand) -> Result<(), GrabError> {
        let link = self.backend.as_ref().map_err(Clone::clone)?;
        link.commands.try_send(command).map_err(|e| {
            error!("Failed to send backend command: {}", e);
            GrabError::NotPermitted("the backend is not accepting commands".to_string())
        })
    }

    /// Apply pending backend events in arrival order; true when the console
    /// gained lines
    fn drain_backend_events(&mut self) -> bool {
        let mut events = Vec::new();
        if let Ok(link) = self.backend.as_mut() {
            while let Ok(event) = link.events.try_recv() {
                events.push(event);
            }
        }

        let mut console_grew = false;
        for event in events {
            match event {
                BackendEvent::FetchStarted => {
                    self.status_message = "Fetching video info...".to_string();
                }
                BackendEvent::FetchCompleted(result) => {
                    console_grew |= self.apply_fetch(result);
                }
                BackendEvent::DownloadLog(line) => {
                    self.console_lines.push(line);
                    console_grew = true;
                }
                BackendEvent::DownloadFinished(outcome) => {
                    self.apply_download_outcome(outcome);
                }
            }
        }
        console_grew
    }

    fn apply_fetch(&mut self, result: Result<StreamCatalogueResult, GrabError>) -> bool {
        match self.controller.finish_fetch(result) {
            Ok(catalogue) => {
                self.choices.repopulate(catalogue);
                self.status_message = format!("Found {} streams", catalogue.len());
                false
            }
            Err(e) => {
                self.status_message = "Ready".to_string();
                let logged = matches!(e, GrabError::Fetch(_));
                if logged {
                    self.console_lines.push(e.to_string());
                }
                notify::error(&e);
                logged
            }
        }
    }

    fn apply_download_outcome(&mut self, outcome: Outcome) {
        let destination = self
            .controller
            .active_download()
            .map(|d| d.destination_directory.clone());
        self.controller.finish_download(&outcome);

        match outcome {
            Outcome::Success => {
                self.completed_directory = destination;
                self.status_message = "Download complete".to_string();
                notify::info("Success", "Download completed successfully");
            }
            Outcome::Failure(cause) => {
                self.status_message = "Ready".to_string();
                notify::error(&GrabError::Download(cause));
            }
        }
    }
}

impl Drop for GrabberApp {
    fn drop(&mut self) {
        if let Ok(link) = &self.backend {
            let _ = link.commands.try_send(BackendCommand::Shutdown);
        }
    }
}
