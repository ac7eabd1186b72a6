//! Collaborator boundary: metadata extraction and downloading

pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{DownloadRequest, ProgressReport, RawFormat, RawInfo};
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
