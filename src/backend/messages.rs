use crate::catalogue::StreamCatalogueResult;
use crate::downloader::Outcome;
use crate::selection::DownloadDirective;
use crate::utils::GrabError;

/// Commands sent from GUI to Backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    Fetch {
        url: String,
    },
    Download(DownloadDirective),
    // System
    Shutdown,
}

/// Events sent from Backend to GUI
#[derive(Debug, Clone)]
pub enum BackendEvent {
    // Catalogue
    FetchStarted,
    FetchCompleted(Result<StreamCatalogueResult, GrabError>),

    // Download life-cycle
    DownloadLog(String),
    /// Always after every `DownloadLog` of the same download
    DownloadFinished(Outcome),
}
