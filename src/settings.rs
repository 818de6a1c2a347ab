//! Persisted user settings
//!
//! A read-mostly snapshot of preferences. Only `autoplay_videos` and
//! `sync_file_to_trash_bin` change how a session behaves; the rest is
//! appearance and onboarding state.

use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme_mode: ThemeMode,
    pub use_dynamic_colors: bool,
    pub use_blurred_background: bool,
    /// Auto-open video cards in the external player.
    pub autoplay_videos: bool,
    /// Whether the welcome/tutorial overlay has been dismissed once.
    pub tutorial_completed: bool,
    /// Commit to the system trash bin instead of deleting permanently.
    pub sync_file_to_trash_bin: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            theme_mode: ThemeMode::System,
            use_dynamic_colors: true,
            use_blurred_background: true,
            autoplay_videos: false,
            tutorial_completed: false,
            sync_file_to_trash_bin: true,
        }
    }
}

impl AppSettings {
    /// Settings file path (~/.config/picsweep/settings.json).
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("picsweep").join("settings.json"))
    }

    /// Loads settings, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let path = Self::settings_path().ok_or_else(|| {
            SweepError::Settings("could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| SweepError::Settings(format!("failed to read settings: {e}")))?;

        serde_json::from_str(&contents)
            .map_err(|e| SweepError::Settings(format!("failed to parse settings: {e}")))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().ok_or_else(|| {
            SweepError::Settings("could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SweepError::Settings(format!("failed to create directory: {e}")))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SweepError::Settings(format!("failed to serialize settings: {e}")))?;

        fs::write(path, contents)
            .map_err(|e| SweepError::Settings(format!("failed to write settings: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_mode, ThemeMode::System);
        assert!(settings.sync_file_to_trash_bin);
        assert!(!settings.autoplay_videos);
        assert!(!settings.tutorial_completed);
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let settings = AppSettings {
            theme_mode: ThemeMode::Dark,
            autoplay_videos: true,
            tutorial_completed: true,
            sync_file_to_trash_bin: false,
            ..AppSettings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = AppSettings::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"autoplay_videos": true}"#).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert!(loaded.autoplay_videos);
        assert!(loaded.sync_file_to_trash_bin);
    }
}
