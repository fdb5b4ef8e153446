//! Key-value preference storage and the theme preference adapter.

use crate::storage::config::Theme;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Key under which the theme preference is stored.
pub const THEME_KEY: &str = "theme";

/// A small persistent store for string settings.
pub trait PreferenceStore: Send + Sync {
    /// Read a value; `Ok(None)` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preference store persisted as a flat TOML table.
///
/// Writes go to a sibling temp file that is then renamed over the original,
/// so a failed write leaves the previous contents intact. A file that no
/// longer parses is replaced on the next write.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| PreferenceError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| PreferenceError::Parse(e.to_string()))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PreferenceError::Io(e.to_string()))?;
        }

        let content =
            toml::to_string(values).map_err(|e| PreferenceError::Serialize(e.to_string()))?;

        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(|e| PreferenceError::Io(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| PreferenceError::Io(e.to_string()))?;

        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(PreferenceError::Parse(reason)) => {
                tracing::warn!(
                    "Discarding unreadable preferences at {}: {}",
                    self.path.display(),
                    reason
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// In-process preference store (for testing).
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Io(format!("Lock error: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Io(format!("Lock error: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the theme preference.
///
/// Store failures are logged and never surfaced to the caller.
pub struct ThemePreferences<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> ThemePreferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved theme, or light when unset or unreadable.
    pub fn get_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::error!("Failed to load theme preference: {}", e);
                Theme::default()
            }
        }
    }

    /// Persist the theme. A failure is logged and the stored value is left as it was.
    pub fn set_theme(&self, theme: Theme) {
        match self.store.set(THEME_KEY, theme.as_str()) {
            Ok(()) => tracing::debug!("Saved theme preference: {}", theme),
            Err(e) => tracing::error!("Failed to save theme preference: {}", e),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Preference store errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
