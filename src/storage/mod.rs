//! Storage module for the location history, preferences and configuration.

pub mod config;
pub mod history;
pub mod preferences;
pub mod schema;

pub use config::{AppConfig, ConfigError, LocationSettings, StorageSettings, Theme};
pub use history::{LocationHistoryStore, StorageError};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore,
    ThemePreferences, THEME_KEY,
};
