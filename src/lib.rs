//! tubegrab library
//!
//! Fetch the stream catalogue of a video, pick renditions and download them
//! through yt-dlp.

pub mod backend;
pub mod catalogue;
pub mod controller;
pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod selection;
pub mod utils;

// Re-export main types for easier use
pub use catalogue::{StreamCatalogue, StreamCatalogueResult, StreamDescriptor, StreamKind};
pub use controller::{InteractionController, Phase};
pub use downloader::{DownloadEvent, DownloadOrchestrator, Outcome};
pub use extractor::{Extractor, YtDlpExtractor};
pub use gui::{GrabberApp, Message};
pub use selection::{resolve, DownloadDirective, Selection};
pub use utils::{AppSettings, GrabError, SelectionMode};
