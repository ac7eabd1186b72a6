use crate::extractor::models::{DownloadRequest, ProgressReport, RawInfo};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Core trait for the extraction/download collaborator
///
/// This trait isolates the application from the specific extraction method
/// (yt-dlp subprocess, test doubles).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "ytdlp")
    fn id(&self) -> &'static str;

    /// Extracts video metadata without downloading anything
    async fn extract_metadata(&self, url: &str) -> Result<RawInfo>;

    /// Downloads the requested format(s)
    ///
    /// Progress is reported through `progress` in the order it is produced.
    /// The sender is dropped when the download returns, which closes the
    /// channel for the consumer.
    async fn download(
        &self,
        request: DownloadRequest,
        progress: mpsc::Sender<ProgressReport>,
    ) -> Result<()>;
}
