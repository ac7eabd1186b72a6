//! Stream catalogue: fetch metadata and derive selectable streams

pub mod descriptor;

pub use descriptor::{format_size, simplify_codec, StreamDescriptor, StreamKind};

use crate::extractor::{Extractor, RawInfo};
use crate::utils::error::GrabError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one successful fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamCatalogueResult {
    /// URL the catalogue was fetched from
    pub source_url: String,
    pub title: String,
    /// Extractor-native order, neither sorted nor deduplicated
    pub descriptors: Vec<StreamDescriptor>,
}

impl StreamCatalogueResult {
    /// Build a catalogue from raw metadata, keeping only real streams
    pub fn from_raw(source_url: &str, info: &RawInfo) -> Self {
        let descriptors: Vec<StreamDescriptor> = info
            .formats
            .iter()
            .filter_map(StreamDescriptor::from_raw)
            .collect();

        Self {
            source_url: source_url.to_string(),
            title: info.title.clone().unwrap_or_else(|| "Unknown".to_string()),
            descriptors,
        }
    }

    /// Streams usable as the video side of a selection
    pub fn video_candidates(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.descriptors.iter().filter(|d| d.kind.has_video())
    }

    /// Streams usable as the audio side of a selection
    pub fn audio_candidates(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.descriptors.iter().filter(|d| d.kind.has_audio())
    }

    pub fn get(&self, format_id: &str) -> Option<&StreamDescriptor> {
        self.descriptors.iter().find(|d| d.format_id == format_id)
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
}

/// Fetches metadata through the extractor and builds catalogues
pub struct StreamCatalogue {
    extractor: Arc<dyn Extractor>,
    /// Lowercase extractor key of the supported platform
    platform: String,
    /// Platform name used in notifications
    platform_name: String,
}

impl StreamCatalogue {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        platform: impl Into<String>,
        platform_name: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            platform: platform.into().to_lowercase(),
            platform_name: platform_name.into(),
        }
    }

    /// Fetch metadata for `url` and derive its stream catalogue
    ///
    /// No retry is attempted; a failed fetch is re-triggered by the user.
    pub async fn fetch(&self, url: &str) -> Result<StreamCatalogueResult, GrabError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(GrabError::input("Please enter a URL"));
        }

        debug!("Fetching catalogue via {} for {}", self.extractor.id(), url);
        let info = self
            .extractor
            .extract_metadata(url)
            .await
            .map_err(|e| GrabError::Fetch(format!("{:#}", e)))?;

        let key = info.extractor_key.as_deref().unwrap_or_default();
        if key.to_lowercase() != self.platform {
            warn!("Rejected source handled by extractor {:?}", key);
            return Err(GrabError::UnsupportedSource(self.platform_name.clone()));
        }

        let catalogue = StreamCatalogueResult::from_raw(url, &info);
        if catalogue.is_empty() {
            warn!("No usable formats among {} raw entries", info.formats.len());
            return Err(GrabError::NoFormats);
        }

        info!(
            "Catalogue for '{}': {} of {} formats retained",
            catalogue.title,
            catalogue.len(),
            info.formats.len()
        );
        Ok(catalogue)
    }
}
