//! Presentation state and the user intents that update it.
//!
//! `LocationApp` owns everything a screen needs: the current theme, the
//! captured locations (newest first) and a loading flag that should disable
//! the capture button. Renderers read [`AppState`]; user intents go through
//! `toggle_theme` and `capture`.
//!
//! Every intent takes `&mut self`, so captures are serialized by the borrow:
//! a second capture cannot start until the first has returned.

use crate::location::capture::CaptureWorkflow;
use crate::location::provider::{FixedLocationProvider, LocationProvider};
use crate::location::types::LocationRecord;
use crate::storage::config::{AppConfig, Theme};
use crate::storage::history::{LocationHistoryStore, StorageError};
use crate::storage::preferences::{FilePreferenceStore, PreferenceStore, ThemePreferences};

/// Everything the screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Active theme
    pub theme: Theme,
    /// Captured locations, newest first
    pub locations: Vec<LocationRecord>,
    /// A history load or capture is outstanding
    pub is_loading: bool,
}

/// Application controller wiring preferences, history and capture together.
pub struct LocationApp<S: PreferenceStore, P: LocationProvider> {
    state: AppState,
    preferences: ThemePreferences<S>,
    store: LocationHistoryStore,
    capture: CaptureWorkflow<P>,
}

impl LocationApp<FilePreferenceStore, FixedLocationProvider> {
    /// Build the desktop application from configuration.
    pub fn open(config: &AppConfig) -> Result<Self, StorageError> {
        let store = LocationHistoryStore::open(&config.database_path())?;
        let preferences = FilePreferenceStore::new(config.preferences_path());
        let workflow = CaptureWorkflow::with_accuracy(
            FixedLocationProvider::from_settings(&config.location),
            config.location.accuracy,
        );

        Ok(Self::new(preferences, store, workflow))
    }
}

impl<S: PreferenceStore, P: LocationProvider> LocationApp<S, P> {
    pub fn new(preferences: S, store: LocationHistoryStore, mut capture: CaptureWorkflow<P>) -> Self {
        if let Err(e) = capture.seed_ids(&store) {
            tracing::warn!("Could not read existing location ids: {}", e);
        }

        Self {
            state: AppState::default(),
            preferences: ThemePreferences::new(preferences),
            store,
            capture,
        }
    }

    /// Load the saved theme and the stored history.
    pub fn start(&mut self) {
        self.state.theme = self.preferences.get_theme();
        tracing::info!("Loaded theme: {}", self.state.theme);
        self.reload_history();
    }

    /// Replace the in-memory list with the store's contents.
    ///
    /// On a read failure the list is left as it was.
    pub fn reload_history(&mut self) {
        let was_loading = std::mem::replace(&mut self.state.is_loading, true);

        match self.store.get_all() {
            Ok(locations) => {
                tracing::info!("Loaded {} stored locations", locations.len());
                self.state.locations = locations;
            }
            Err(e) => tracing::error!("Failed to load locations: {}", e),
        }

        self.state.is_loading = was_loading;
    }

    /// Flip the theme and save it. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.state.theme.toggled();
        self.state.theme = theme;
        self.preferences.set_theme(theme);
        theme
    }

    /// Capture the current position and prepend it to the list.
    ///
    /// Returns `None` on any failure (already logged).
    pub async fn capture(&mut self) -> Option<LocationRecord> {
        let was_loading = std::mem::replace(&mut self.state.is_loading, true);
        let result = self.capture.capture_and_store(&self.store).await;
        self.state.is_loading = was_loading;

        let record = result.ok()?;
        self.state.locations.insert(0, record);
        Some(record)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &LocationHistoryStore {
        &self.store
    }

    pub fn preferences(&self) -> &ThemePreferences<S> {
        &self.preferences
    }
}
