//! Error handling for tubegrab

use thiserror::Error;

/// Main error type for tubegrab
///
/// Every variant carries plain strings so the error can travel inside GUI
/// messages and backend events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrabError {
    /// Missing or invalid user input (URL, format, destination)
    #[error("{0}")]
    Input(String),

    /// The URL resolved to a platform other than the supported one
    #[error("Only {0} videos are supported")]
    UnsupportedSource(String),

    #[error("No valid formats available")]
    NoFormats,

    #[error("Failed to fetch video info: {0}")]
    Fetch(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    /// The interaction state does not allow the requested operation
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}

impl GrabError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Dialog title for this error kind
    pub fn title(&self) -> &'static str {
        match self {
            GrabError::Input(_) => "Error",
            GrabError::UnsupportedSource(_) => "Unsupported source",
            GrabError::NoFormats => "No formats",
            GrabError::Fetch(_) => "Fetch failed",
            GrabError::Download(_) => "Download failed",
            GrabError::YtDlpNotFound => "yt-dlp missing",
            GrabError::NotPermitted(_) => "Busy",
        }
    }
}
