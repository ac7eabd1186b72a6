use super::messages::{BackendCommand, BackendEvent};
use crate::catalogue::StreamCatalogue;
use crate::downloader::{DownloadEvent, DownloadOrchestrator};
use crate::extractor::{Extractor, YtDlpExtractor};
use crate::selection::DownloadDirective;
use crate::utils::config::AppSettings;
use crate::utils::GrabError;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Capacity of the per-download event channel
const DOWNLOAD_EVENT_BUFFER: usize = 64;

/// Owns the catalogue and orchestrator; the GUI talks to it only through
/// command and event channels.
pub struct BackendActor {
    receiver: mpsc::Receiver<BackendCommand>,
    sender: mpsc::Sender<BackendEvent>,

    // Components
    catalogue: StreamCatalogue,
    orchestrator: DownloadOrchestrator,
}

impl BackendActor {
    /// Build an actor backed by yt-dlp
    pub fn new(
        settings: &AppSettings,
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
    ) -> Result<Self, GrabError> {
        let ytdlp = Arc::new(YtDlpExtractor::new(settings.ytdlp_path.as_deref())?);
        Ok(Self::with_extractor(ytdlp, settings, receiver, sender))
    }

    /// Build an actor around any extractor
    pub fn with_extractor(
        extractor: Arc<dyn Extractor>,
        settings: &AppSettings,
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
    ) -> Self {
        let catalogue = StreamCatalogue::new(
            Arc::clone(&extractor),
            settings.platform.clone(),
            settings.platform_display_name(),
        );
        let orchestrator = DownloadOrchestrator::new(extractor);

        Self {
            receiver,
            sender,
            catalogue,
            orchestrator,
        }
    }

    pub async fn run(mut self) {
        info!("BackendActor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                BackendCommand::Fetch { url } => {
                    self.handle_fetch(url).await;
                }
                BackendCommand::Download(directive) => {
                    self.handle_download(directive);
                }
                BackendCommand::Shutdown => {
                    info!("BackendActor shutting down");
                    break;
                }
            }
        }
    }

    async fn handle_fetch(&self, url: String) {
        let _ = self.sender.send(BackendEvent::FetchStarted).await;
        let result = self.catalogue.fetch(&url).await;
        if let Err(e) = &result {
            warn!("Fetch failed: {}", e);
        }
        let _ = self.sender.send(BackendEvent::FetchCompleted(result)).await;
    }

    /// Run the download on its own task so the actor keeps draining commands
    fn handle_download(&self, directive: DownloadDirective) {
        let orchestrator = self.orchestrator.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let (tx, mut rx) = mpsc::channel(DOWNLOAD_EVENT_BUFFER);

            let forward = async {
                while let Some(event) = rx.recv().await {
                    let event = match event {
                        DownloadEvent::Log(line) => BackendEvent::DownloadLog(line),
                        DownloadEvent::Finished(outcome) => BackendEvent::DownloadFinished(outcome),
                    };
                    if sender.send(event).await.is_err() {
                        debug!("GUI gone; dropping download events");
                    }
                }
            };

            let run = async move {
                orchestrator.execute(&directive, &tx).await
            };

            let (outcome, ()) = tokio::join!(run, forward);
            debug!("Download task ended with {:?}", outcome);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{DownloadRequest, ProgressReport, RawFormat, RawInfo};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct OneFormat;

    #[async_trait]
    impl Extractor for OneFormat {
        fn id(&self) -> &'static str {
            "one-format"
        }

        async fn extract_metadata(&self, _url: &str) -> Result<RawInfo> {
            Ok(RawInfo {
                title: Some("Clip".to_string()),
                extractor_key: Some("Youtube".to_string()),
                formats: vec![RawFormat {
                    format_id: "18".to_string(),
                    vcodec: Some("avc1".to_string()),
                    acodec: Some("mp4a".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            })
        }

        async fn download(
            &self,
            _request: DownloadRequest,
            progress: mpsc::Sender<ProgressReport>,
        ) -> Result<()> {
            progress
                .send(ProgressReport::downloading("100%", "1MiB", "1MiB/s"))
                .await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_actor_fetches_then_downloads() {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(32);
        let actor = BackendActor::with_extractor(
            Arc::new(OneFormat),
            &AppSettings::default(),
            cmd_rx,
            event_tx,
        );
        tokio::spawn(actor.run());

        cmd_tx
            .send(BackendCommand::Fetch { url: "https://youtu.be/abc".to_string() })
            .await
            .unwrap();
        assert!(matches!(event_rx.recv().await, Some(BackendEvent::FetchStarted)));
        match event_rx.recv().await {
            Some(BackendEvent::FetchCompleted(Ok(catalogue))) => assert_eq!(catalogue.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }

        let directive = DownloadDirective {
            source_url: "https://youtu.be/abc".to_string(),
            format_expression: "18".to_string(),
            destination_directory: PathBuf::from("/tmp"),
            output_name_template: "%(title)s.%(ext)s".to_string(),
        };
        cmd_tx.send(BackendCommand::Download(directive)).await.unwrap();

        let mut lines = Vec::new();
        loop {
            match event_rx.recv().await {
                Some(BackendEvent::DownloadLog(line)) => lines.push(line),
                Some(BackendEvent::DownloadFinished(outcome)) => {
                    assert!(outcome.is_success());
                    break;
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(
            lines,
            [
                "Starting download...",
                "Downloading: 100% of 1MiB at 1MiB/s",
                "Download completed successfully!",
            ]
        );

        cmd_tx.send(BackendCommand::Shutdown).await.unwrap();
    }
}
