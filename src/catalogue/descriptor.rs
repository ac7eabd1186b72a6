//! Selectable stream descriptors derived from raw extractor formats

use crate::extractor::RawFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Placeholder for values the extractor did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Which elementary streams a rendition carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    CombinedAV,
    VideoOnly,
    AudioOnly,
}

impl StreamKind {
    /// Classify by presence of a real video and/or audio codec
    pub fn classify(has_video: bool, has_audio: bool) -> Option<Self> {
        match (has_video, has_audio) {
            (true, true) => Some(StreamKind::CombinedAV),
            (true, false) => Some(StreamKind::VideoOnly),
            (false, true) => Some(StreamKind::AudioOnly),
            (false, false) => None,
        }
    }

    pub fn has_video(self) -> bool {
        matches!(self, StreamKind::CombinedAV | StreamKind::VideoOnly)
    }

    pub fn has_audio(self) -> bool {
        matches!(self, StreamKind::CombinedAV | StreamKind::AudioOnly)
    }

    pub fn label(self) -> &'static str {
        match self {
            StreamKind::CombinedAV => "Video+Audio",
            StreamKind::VideoOnly => "Video Only",
            StreamKind::AudioOnly => "Audio Only",
        }
    }
}

/// One selectable rendition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Opaque id, handed back to the extractor unmodified
    pub format_id: String,
    pub kind: StreamKind,
    pub container: String,
    pub resolution: Option<String>,
    pub frame_rate: Option<f64>,
    pub size_bytes: Option<u64>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

impl StreamDescriptor {
    /// Build a descriptor from a raw format, or `None` when the format
    /// carries neither a video nor an audio stream.
    pub fn from_raw(raw: &RawFormat) -> Option<Self> {
        if raw.is_empty_stream() {
            return None;
        }
        let kind = StreamKind::classify(raw.has_video(), raw.has_audio())?;

        let codec = |value: &Option<String>| {
            simplify_codec(value.as_deref().unwrap_or(NOT_AVAILABLE)).to_string()
        };

        Some(Self {
            format_id: raw.format_id.clone(),
            kind,
            container: raw.ext.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            resolution: raw.resolution.clone(),
            frame_rate: raw.fps,
            size_bytes: raw.filesize,
            video_codec: kind.has_video().then(|| codec(&raw.vcodec)),
            audio_codec: kind.has_audio().then(|| codec(&raw.acodec)),
        })
    }

    /// Human-readable size, see [`format_size`]
    pub fn size_label(&self) -> String {
        format_size(self.size_bytes)
    }

    pub fn frame_rate_label(&self) -> String {
        match self.frame_rate {
            Some(fps) if fps.fract() == 0.0 => format!("{}", fps as i64),
            Some(fps) => format!("{}", fps),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Single-line label shown in selection lists
    pub fn display_label(&self) -> String {
        format!(
            "{} | {} | {} | {}fps | {} | Video: {} | Audio: {}",
            self.kind.label(),
            self.container,
            self.resolution.as_deref().unwrap_or(NOT_AVAILABLE),
            self.frame_rate_label(),
            self.size_label(),
            self.video_codec.as_deref().unwrap_or("none"),
            self.audio_codec.as_deref().unwrap_or("none"),
        )
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

/// Strip profile/level suffixes: `avc1.640028` becomes `avc1`
pub fn simplify_codec(codec: &str) -> &str {
    codec.split('.').next().unwrap_or(codec)
}

/// Megabytes with two decimals; zero and unknown sizes are both `N/A`
pub fn format_size(size_bytes: Option<u64>) -> String {
    match size_bytes {
        Some(bytes) if bytes > 0 => format!("{:.2} MB", bytes as f64 / BYTES_PER_MB),
        _ => NOT_AVAILABLE.to_string(),
    }
}
