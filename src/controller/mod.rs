//! Interaction state machine gating fetch and download triggers
//!
//! ```text
//! Idle  --fetch ok--------> Ready
//! Ready --start download--> Downloading
//! Downloading --finished--> Ready
//! ```
//!
//! A failed fetch leaves the phase and the previous catalogue untouched.
//! Both triggers are disabled while a fetch or a download is in flight.

use crate::catalogue::StreamCatalogueResult;
use crate::downloader::Outcome;
use crate::selection::DownloadDirective;
use crate::utils::error::GrabError;
use tracing::{debug, info};

/// Application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No catalogue loaded
    Idle,
    /// Catalogue loaded, no download running
    Ready,
    Downloading,
}

/// Single source of truth for control availability
#[derive(Debug)]
pub struct InteractionController {
    phase: Phase,
    fetch_in_flight: bool,
    catalogue: Option<StreamCatalogueResult>,
    active: Option<DownloadDirective>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            fetch_in_flight: false,
            catalogue: None,
            active: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalogue(&self) -> Option<&StreamCatalogueResult> {
        self.catalogue.as_ref()
    }

    /// Directive of the running download, if any
    pub fn active_download(&self) -> Option<&DownloadDirective> {
        self.active.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn can_fetch(&self) -> bool {
        !self.fetch_in_flight && self.phase != Phase::Downloading
    }

    pub fn can_download(&self) -> bool {
        !self.fetch_in_flight && self.phase == Phase::Ready
    }

    /// Selection widgets and destination are editable only with a catalogue
    /// and nothing running
    pub fn can_edit_selection(&self) -> bool {
        self.can_download()
    }

    /// Mark a fetch as dispatched
    pub fn begin_fetch(&mut self) -> Result<(), GrabError> {
        if !self.can_fetch() {
            return Err(GrabError::NotPermitted(
                "a fetch or download is already running".to_string(),
            ));
        }
        self.fetch_in_flight = true;
        debug!("Fetch dispatched from {:?}", self.phase);
        Ok(())
    }

    /// Apply a fetch result; a success replaces any previous catalogue
    pub fn finish_fetch(
        &mut self,
        result: Result<StreamCatalogueResult, GrabError>,
    ) -> Result<&StreamCatalogueResult, GrabError> {
        self.fetch_in_flight = false;
        let catalogue = result?;

        info!(
            "Catalogue loaded ({} streams), {:?} -> Ready",
            catalogue.len(),
            self.phase
        );
        self.phase = Phase::Ready;
        let stored = self.catalogue.insert(catalogue);
        Ok(&*stored)
    }

    /// Move to `Downloading` with the directive about to be dispatched
    pub fn begin_download(&mut self, directive: DownloadDirective) -> Result<(), GrabError> {
        if !self.can_download() {
            return Err(GrabError::NotPermitted(match self.phase {
                Phase::Idle => "fetch video info first".to_string(),
                _ => "a fetch or download is already running".to_string(),
            }));
        }

        info!("Ready -> Downloading ({})", directive.format_expression);
        self.active = Some(directive);
        self.phase = Phase::Downloading;
        Ok(())
    }

    /// Return to `Ready` once the running download reports its outcome
    pub fn finish_download(&mut self, outcome: &Outcome) {
        if self.phase != Phase::Downloading {
            debug!("Ignoring download outcome in {:?}", self.phase);
            return;
        }
        info!("Downloading -> Ready ({:?})", outcome);
        self.active = None;
        self.phase = Phase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{StreamDescriptor, StreamKind};
    use std::path::PathBuf;

    fn catalogue(title: &str) -> StreamCatalogueResult {
        StreamCatalogueResult {
            source_url: "https://www.youtube.com/watch?v=abc".to_string(),
            title: title.to_string(),
            descriptors: vec![StreamDescriptor {
                format_id: "18".to_string(),
                kind: StreamKind::CombinedAV,
                container: "mp4".to_string(),
                resolution: None,
                frame_rate: None,
                size_bytes: None,
                video_codec: Some("avc1".to_string()),
                audio_codec: Some("mp4a".to_string()),
            }],
        }
    }

    fn directive() -> DownloadDirective {
        DownloadDirective {
            source_url: "https://www.youtube.com/watch?v=abc".to_string(),
            format_expression: "18".to_string(),
            destination_directory: PathBuf::from("/tmp"),
            output_name_template: "%(title)s.%(ext)s".to_string(),
        }
    }

    #[test]
    fn test_fetch_success_moves_to_ready() {
        let mut controller = InteractionController::new();
        assert!(controller.can_fetch());
        assert!(!controller.can_download());

        controller.begin_fetch().unwrap();
        assert!(!controller.can_fetch());

        controller.finish_fetch(Ok(catalogue("Clip"))).unwrap();
        assert_eq!(controller.phase(), Phase::Ready);
        assert!(controller.can_download());
        assert_eq!(controller.catalogue().unwrap().title, "Clip");
    }

    #[test]
    fn test_fetch_failure_keeps_state() {
        let mut controller = InteractionController::new();
        controller.begin_fetch().unwrap();
        let err = controller.finish_fetch(Err(GrabError::NoFormats)).unwrap_err();
        assert_eq!(err, GrabError::NoFormats);
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.catalogue().is_none());
        assert!(controller.can_fetch());

        controller.begin_fetch().unwrap();
        controller.finish_fetch(Ok(catalogue("First"))).unwrap();
        controller.begin_fetch().unwrap();
        controller
            .finish_fetch(Err(GrabError::UnsupportedSource("YouTube".into())))
            .unwrap_err();
        assert_eq!(controller.phase(), Phase::Ready);
        assert_eq!(controller.catalogue().unwrap().title, "First");
    }

    #[test]
    fn test_refetch_replaces_catalogue() {
        let mut controller = InteractionController::new();
        controller.begin_fetch().unwrap();
        controller.finish_fetch(Ok(catalogue("First"))).unwrap();
        controller.begin_fetch().unwrap();
        controller.finish_fetch(Ok(catalogue("Second"))).unwrap();
        assert_eq!(controller.catalogue().unwrap().title, "Second");
    }

    #[test]
    fn test_download_gates_both_triggers() {
        let mut controller = InteractionController::new();
        assert!(matches!(
            controller.begin_download(directive()),
            Err(GrabError::NotPermitted(_))
        ));

        controller.begin_fetch().unwrap();
        controller.finish_fetch(Ok(catalogue("Clip"))).unwrap();
        controller.begin_download(directive()).unwrap();

        assert_eq!(controller.phase(), Phase::Downloading);
        assert!(!controller.can_fetch());
        assert!(!controller.can_download());
        assert!(controller.begin_fetch().is_err());
        assert!(controller.begin_download(directive()).is_err());

        controller.finish_download(&Outcome::Failure("boom".into()));
        assert_eq!(controller.phase(), Phase::Ready);
        assert!(controller.active_download().is_none());
        assert!(controller.can_download());
    }

    #[test]
    fn test_stray_outcome_is_ignored() {
        let mut controller = InteractionController::new();
        controller.finish_download(&Outcome::Success);
        assert_eq!(controller.phase(), Phase::Idle);
    }
}
