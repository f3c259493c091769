//! Configuration settings for yt-transcript.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub formatting: FormattingSettings,
    pub search: SearchSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// YouTube provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Caption languages to try, in order of preference.
    pub languages: Vec<String>,
    /// Upper bound on a whole transcript fetch, in seconds.
    pub timeout_seconds: u64,
    /// Base URL of the YouTube web frontend.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            timeout_seconds: 20,
            base_url: "https://www.youtube.com".to_string(),
            user_agent: concat!("yt-transcript/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl YoutubeSettings {
    /// The fetch timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

/// Thresholds for the readability pass over raw captions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormattingSettings {
    /// Silence between two captions that closes the current sentence.
    pub silence_gap_seconds: f64,
    /// Maximum characters in one formatted segment.
    pub max_unit_chars: usize,
    /// Maximum span of one formatted segment, in seconds.
    pub max_unit_seconds: f64,
    /// Minimum characters before a capitalized word may start a new segment.
    pub min_unit_chars: usize,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            silence_gap_seconds: 1.5,
            max_unit_chars: 320,
            max_unit_seconds: 30.0,
            min_unit_chars: 60,
        }
    }
}

/// Keyword search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Seconds of surrounding transcript attached to each match.
    pub context_seconds: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            context_seconds: 15.0,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TranscriptError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yt-transcript")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.youtube.languages, vec!["en".to_string()]);
        assert_eq!(settings.formatting, FormattingSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[youtube]\nlanguages = [\"de\", \"en\"]\n\n[formatting]\nsilence_gap_seconds = 3.0\n",
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.youtube.languages, vec!["de", "en"]);
        assert_eq!(settings.youtube.timeout_seconds, 20);
        assert_eq!(settings.formatting.silence_gap_seconds, 3.0);
        assert_eq!(settings.formatting.max_unit_chars, 320);
        assert_eq!(settings.search.context_seconds, 15.0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.search.context_seconds = 5.0;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.search.context_seconds, 5.0);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[youtube\nlanguages = ").unwrap();

        assert!(Settings::load_from(Some(&path)).is_err());
    }
}
