//! Resolve user stream choices into a download directive

use crate::catalogue::{StreamCatalogueResult, StreamKind};
use crate::utils::error::GrabError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// yt-dlp output template, relative to the destination directory
pub const OUTPUT_NAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// What the user picked in the stream lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One entry from the merged list
    Single { format_id: Option<String> },
    /// Independent video and audio picks, each gated by an include toggle
    Split {
        want_video: bool,
        video_format_id: Option<String>,
        want_audio: bool,
        audio_format_id: Option<String>,
    },
}

impl Selection {
    /// Parse a format expression as typed on the command line: `137+140`
    /// picks a video and an audio stream, anything else a single format.
    pub fn from_expression(expression: &str) -> Self {
        match expression.trim().split_once('+') {
            Some((video, audio)) => Selection::Split {
                want_video: true,
                video_format_id: Some(video.trim().to_string()).filter(|id| !id.is_empty()),
                want_audio: true,
                audio_format_id: Some(audio.trim().to_string()).filter(|id| !id.is_empty()),
            },
            None => Selection::Single {
                format_id: Some(expression.trim().to_string()).filter(|id| !id.is_empty()),
            },
        }
    }
}

/// Fully resolved request for one download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDirective {
    pub source_url: String,
    /// A format id, or `video+audio` to have the streams muxed
    pub format_expression: String,
    pub destination_directory: PathBuf,
    pub output_name_template: String,
}

impl DownloadDirective {
    /// Full output path template handed to the extractor
    pub fn output_template(&self) -> PathBuf {
        self.destination_directory.join(&self.output_name_template)
    }
}

/// Turn a selection into a directive against a fetched catalogue
///
/// The destination is validated first, so a missing directory is reported
/// regardless of the stream choice.
pub fn resolve(
    catalogue: &StreamCatalogueResult,
    selection: &Selection,
    destination: Option<&Path>,
) -> Result<DownloadDirective, GrabError> {
    let destination_directory = check_destination(destination)?;

    let format_expression = match selection {
        Selection::Single { format_id } => {
            let id = format_id
                .as_deref()
                .filter(|id| catalogue.get(id).is_some())
                .ok_or_else(|| GrabError::input("Please select a valid format"))?;
            id.to_string()
        }
        Selection::Split {
            want_video,
            video_format_id,
            want_audio,
            audio_format_id,
        } => {
            let video = want_video
                .then(|| pick(catalogue, video_format_id.as_deref(), StreamKind::has_video))
                .map(|id| id.ok_or_else(|| GrabError::input("Please select a valid video format")))
                .transpose()?;
            let audio = want_audio
                .then(|| pick(catalogue, audio_format_id.as_deref(), StreamKind::has_audio))
                .map(|id| id.ok_or_else(|| GrabError::input("Please select a valid audio format")))
                .transpose()?;

            match (video, audio) {
                (Some(v), Some(a)) => format!("{}+{}", v, a),
                (Some(id), None) | (None, Some(id)) => id.to_string(),
                (None, None) => {
                    return Err(GrabError::input("Please include a video or an audio stream"))
                }
            }
        }
    };

    debug!("Resolved selection to format expression {}", format_expression);
    Ok(DownloadDirective {
        source_url: catalogue.source_url.clone(),
        format_expression,
        destination_directory,
        output_name_template: OUTPUT_NAME_TEMPLATE.to_string(),
    })
}

/// Look up `id` among catalogue entries whose kind passes `accepts`
fn pick<'a>(
    catalogue: &'a StreamCatalogueResult,
    id: Option<&str>,
    accepts: fn(StreamKind) -> bool,
) -> Option<&'a str> {
    let descriptor = catalogue.get(id?)?;
    accepts(descriptor.kind).then_some(descriptor.format_id.as_str())
}

fn check_destination(destination: Option<&Path>) -> Result<PathBuf, GrabError> {
    let dir = destination
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| GrabError::input("Please select a save location"))?;

    let metadata = std::fs::metadata(dir)
        .map_err(|_| GrabError::input(format!("Save location does not exist: {}", dir.display())))?;
    if !metadata.is_dir() {
        return Err(GrabError::input(format!(
            "Save location is not a directory: {}",
            dir.display()
        )));
    }
    if metadata.permissions().readonly() {
        return Err(GrabError::input(format!(
            "Save location is not writable: {}",
            dir.display()
        )));
    }

    Ok(dir.to_path_buf())
}
