//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Destination directory offered when the window opens
    pub download_location: Option<PathBuf>,

    /// Explicit yt-dlp executable, bypassing discovery
    pub ytdlp_path: Option<PathBuf>,

    /// Extractor key of the only platform accepted by a fetch
    pub platform: String,

    /// How streams are presented for selection
    pub selection_mode: SelectionMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: dirs::download_dir(),
            ytdlp_path: None,
            platform: "youtube".to_string(),
            selection_mode: SelectionMode::Single,
        }
    }
}

impl AppSettings {
    /// Human-readable platform name for notifications
    pub fn platform_display_name(&self) -> String {
        match self.platform.to_lowercase().as_str() {
            "youtube" => "YouTube".to_string(),
            other => {
                let mut chars = other.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Stream selection presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionMode {
    /// One merged list; a single format id is downloaded
    #[default]
    Single,
    /// Independent video and audio lists, muxed by yt-dlp
    Split,
}

impl SelectionMode {
    /// Get string representation for display
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Single => "Single stream",
            SelectionMode::Split => "Separate video + audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert_eq!(config.platform, "youtube");
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert!(config.ytdlp_path.is_none());
    }

    #[test]
    fn test_platform_display_name() {
        let mut config = AppSettings::default();
        assert_eq!(config.platform_display_name(), "YouTube");

        config.platform = "vimeo".to_string();
        assert_eq!(config.platform_display_name(), "Vimeo");
    }

    #[test]
    fn test_settings_roundtrip_through_json() {
        let config = AppSettings {
            selection_mode: SelectionMode::Split,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.selection_mode, SelectionMode::Split);
    }
}
