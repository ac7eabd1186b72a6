//! Typed records for yt-dlp metadata and progress

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Video metadata as reported by the extractor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Extractor that handled the URL, e.g. "Youtube"
    #[serde(default)]
    pub extractor_key: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// One rendition as reported by the extractor
///
/// yt-dlp writes the literal string "none" for a missing elementary stream;
/// an absent field means the extractor did not report it at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFormat {
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub video_ext: Option<String>,
    #[serde(default)]
    pub audio_ext: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
}

const NONE_MARKER: &str = "none";

impl RawFormat {
    /// Neither a video nor an audio elementary stream is present
    pub fn is_empty_stream(&self) -> bool {
        self.video_ext.as_deref() == Some(NONE_MARKER)
            && self.audio_ext.as_deref() == Some(NONE_MARKER)
    }

    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some(NONE_MARKER)
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some(NONE_MARKER)
    }
}

/// Parameters of one yt-dlp download invocation
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub url: String,
    pub format: String,
    /// Output path template, e.g. `/home/me/Videos/%(title)s.%(ext)s`
    pub output_template: PathBuf,
}

/// One progress callback from the extractor, strings passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub status: String,
    pub percent: String,
    pub total: String,
    pub speed: String,
}

impl ProgressReport {
    pub fn downloading(
        percent: impl Into<String>,
        total: impl Into<String>,
        speed: impl Into<String>,
    ) -> Self {
        Self {
            status: "downloading".to_string(),
            percent: percent.into(),
            total: total.into(),
            speed: speed.into(),
        }
    }

    pub fn is_downloading(&self) -> bool {
        self.status == "downloading"
    }
}
