//! Drives one download through the extractor and relays its progress

use crate::downloader::progress::{
    failure_line, progress_line, DownloadEvent, Outcome, COMPLETED_LINE, STARTING_LINE,
};
use crate::extractor::{DownloadRequest, Extractor, ProgressReport};
use crate::selection::DownloadDirective;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Capacity of the channel between the extractor and the orchestrator
const PROGRESS_BUFFER: usize = 64;

/// Runs download directives; it neither queues nor parallelizes them
#[derive(Clone)]
pub struct DownloadOrchestrator {
    extractor: Arc<dyn Extractor>,
}

impl DownloadOrchestrator {
    pub fn new(extractor: Arc<dyn Extractor>) -> Self {
        Self { extractor }
    }

    /// Execute `directive`, sending console lines and then exactly one
    /// [`DownloadEvent::Finished`] to `events`.
    ///
    /// Extractor errors become [`Outcome::Failure`]; they are never
    /// propagated to the caller.
    pub async fn execute(
        &self,
        directive: &DownloadDirective,
        events: &mpsc::Sender<DownloadEvent>,
    ) -> Outcome {
        emit(events, DownloadEvent::Log(STARTING_LINE.to_string())).await;

        let request = DownloadRequest {
            url: directive.source_url.clone(),
            format: directive.format_expression.clone(),
            output_template: directive.output_template(),
        };
        info!(
            "Dispatching download of {} as {} to {}",
            request.url,
            request.format,
            directive.destination_directory.display()
        );

        let (progress_tx, mut progress_rx) = mpsc::channel(PROGRESS_BUFFER);
        let (result, relayed) = tokio::join!(
            self.extractor.download(request, progress_tx),
            relay_progress(&mut progress_rx, events),
        );
        debug!("Relayed {} progress lines", relayed);

        let outcome = match result {
            Ok(()) => {
                emit(events, DownloadEvent::Log(COMPLETED_LINE.to_string())).await;
                Outcome::Success
            }
            Err(e) => {
                let cause = format!("{:#}", e);
                error!("Download failed: {}", cause);
                emit(events, DownloadEvent::Log(failure_line(&cause))).await;
                Outcome::Failure(cause)
            }
        };

        emit(events, DownloadEvent::Finished(outcome.clone())).await;
        outcome
    }
}

/// Forward progress until the extractor drops its sender
async fn relay_progress(
    progress: &mut mpsc::Receiver<ProgressReport>,
    events: &mpsc::Sender<DownloadEvent>,
) -> usize {
    let mut relayed = 0;
    while let Some(report) = progress.recv().await {
        if report.is_downloading() {
            emit(events, DownloadEvent::Log(progress_line(&report))).await;
            relayed += 1;
        }
    }
    relayed
}

async fn emit(events: &mpsc::Sender<DownloadEvent>, event: DownloadEvent) {
    if events.send(event).await.is_err() {
        warn!("Download event receiver dropped");
    }
}
