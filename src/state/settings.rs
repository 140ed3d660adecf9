/// Persisted user settings
///
/// Small JSON file remembering the last filter, the dialog folders and a
/// few knobs. Stored in the user's config directory:
/// - Linux: ~/.config/photo-converter/settings.json
/// - macOS: ~/Library/Application Support/photo-converter/settings.json
/// - Windows: %APPDATA%\photo-converter\settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConverterError, Result};
use crate::filters::FilterKind;

const APP_DIR: &str = "photo-converter";
const SETTINGS_FILE: &str = "settings.json";

/// All persisted settings
///
/// Unknown or missing fields fall back to their defaults so older files
/// keep loading.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Filter selected when the app was last closed
    pub last_filter: FilterKind,

    /// Folder the open dialog starts in
    pub last_open_dir: Option<PathBuf>,

    /// Folder the save dialog starts in
    pub last_save_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set ("info", "debug", ...)
    pub log_level: Option<String>,

    /// JPEG quality for saved images (1-100)
    pub jpeg_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_filter: FilterKind::OilPainting,
            last_open_dir: None,
            last_save_dir: None,
            log_level: None,
            jpeg_quality: 90,
        }
    }
}

impl Settings {
    /// Convert to JSON string for storage
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.jpeg_quality = settings.jpeg_quality.clamp(1, 100);
        Ok(settings)
    }

    /// Reset everything to defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get the path where the settings file should be stored
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Some(path)
    }

    /// Load settings from the user's config directory
    ///
    /// Runs before logging is set up, so instead of logging, any problem
    /// is returned next to the defaults for the caller to report.
    pub fn load() -> (Self, Option<ConverterError>) {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => (Self::default(), Some(ConverterError::NoConfigDir)),
        }
    }

    /// Read `path`, falling back to defaults
    ///
    /// A missing file is the normal first run and is not a problem; an
    /// unreadable or corrupt one is.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConverterError>) {
        match Self::load_from(path) {
            Ok(settings) => (settings, None),
            Err(ConverterError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), None)
            }
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| ConverterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }

    /// Save settings to the user's config directory
    pub fn save(&self) -> Result<()> {
        match Self::default_path() {
            Some(path) => self.save_to(&path),
            None => Err(ConverterError::NoConfigDir),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConverterError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_json()?).map_err(|source| ConverterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let mut settings = Settings::default();
        settings.last_filter = FilterKind::Cartoon;
        settings.last_open_dir = Some(PathBuf::from("/home/user/Pictures"));
        settings.jpeg_quality = 75;

        let json = settings.to_json().unwrap();
        let restored = Settings::from_json(&json).unwrap();
        assert_eq!(settings, restored);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let restored = Settings::from_json(r#"{"last_filter":"Pointillism"}"#).unwrap();
        assert_eq!(restored.last_filter, FilterKind::Pointillism);
        assert_eq!(restored.jpeg_quality, 90);
        assert!(restored.last_save_dir.is_none());
    }

    #[test]
    fn test_quality_is_clamped() {
        let restored = Settings::from_json(r#"{"jpeg_quality":0}"#).unwrap();
        assert_eq!(restored.jpeg_quality, 1);
    }

    #[test]
    fn test_reset() {
        let mut settings = Settings::default();
        settings.last_filter = FilterKind::ColoredPencil;
        settings.log_level = Some("debug".to_string());
        settings.reset();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.last_filter = FilterKind::PencilSketch;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConverterError::Settings(_))));
    }

    #[test]
    fn test_corrupt_file_falls_back_with_a_problem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"last_filter": 42"#).unwrap();

        let (settings, problem) = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
        assert!(matches!(problem, Some(ConverterError::Settings(_))));
    }

    #[test]
    fn test_missing_file_is_a_quiet_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, problem) = Settings::load_or_default(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
        assert!(problem.is_none());
    }
}
