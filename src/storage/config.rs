//! Application configuration and the theme preference type.
//!
//! Configuration is read from `config.toml` in the platform data directory.
//! A missing file yields defaults.

use crate::location::types::{Accuracy, Coordinates};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Value written to the preference store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored preference value.
    ///
    /// Anything other than `"dark"` is treated as light.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

/// Application configuration.
///
/// Every field has a default, so a file may set only the values it cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Storage settings
    pub storage: StorageSettings,
    /// Location settings
    pub location: LocationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            storage: StorageSettings::default(),
            location: LocationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load the configuration kept in the platform data directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&default_data_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// `data_dir` becomes the file's parent directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

            toml::from_str::<AppConfig>(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            AppConfig::default()
        };

        config.data_dir = data_dir;
        Ok(config)
    }

    /// Write the configuration to `path`, creating missing directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |e: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(write_error)
    }

    /// Full path of the location history database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.database_file)
    }

    /// Full path of the preference file.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.preferences_file)
    }
}

/// Storage-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Database file name, relative to the data directory
    pub database_file: String,
    /// Preference file name, relative to the data directory
    pub preferences_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "locations.db".to_string(),
            preferences_file: "preferences.toml".to_string(),
        }
    }
}

/// Location-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    /// Accuracy requested from the position sensor
    pub accuracy: Accuracy,
    /// Whether the desktop provider grants foreground permission
    pub permission_granted: bool,
    /// Position reported by the desktop provider, if any
    pub fixed_position: Option<Coordinates>,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            permission_granted: true,
            fixed_position: None,
        }
    }
}

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Platform data directory holding the config, database and preferences.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "geolog", "GeoLog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Cannot write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Serialize error: {0}")]
    Serialize(String),
}
