//! Location capture workflow.
//!
//! Permission prompt, one-shot position read, then append to the history
//! store. Nothing is written unless every earlier step succeeded.

use crate::location::id_generator::IdGenerator;
use crate::location::provider::LocationProvider;
use crate::location::types::{Accuracy, LocationError, LocationRecord};
use crate::storage::history::{LocationHistoryStore, StorageError};
use thiserror::Error;

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    PermissionRequested,
    Denied,
    Granted,
    Capturing,
    Success,
    Failure,
}

/// Errors from a capture attempt.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptureError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("No unused location ids remain")]
    IdsExhausted,

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StorageError),
}

impl From<LocationError> for CaptureError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::PermissionDenied => CaptureError::PermissionDenied,
            LocationError::SensorUnavailable(reason) => CaptureError::SensorUnavailable(reason),
            LocationError::InvalidCoordinates { .. } => {
                CaptureError::SensorUnavailable(e.to_string())
            }
        }
    }
}

/// Drives a single capture from permission prompt to stored record.
pub struct CaptureWorkflow<P: LocationProvider> {
    provider: P,
    accuracy: Accuracy,
    ids: IdGenerator,
    /// States entered by the most recent capture, in order
    transitions: Vec<CaptureState>,
}

impl<P: LocationProvider> CaptureWorkflow<P> {
    /// Create a workflow requesting the default (high) accuracy.
    pub fn new(provider: P) -> Self {
        Self::with_accuracy(provider, Accuracy::default())
    }

    pub fn with_accuracy(provider: P, accuracy: Accuracy) -> Self {
        Self {
            provider,
            accuracy,
            ids: IdGenerator::new(),
            transitions: Vec::new(),
        }
    }

    /// Continue id issuance after the ids already present in `store`.
    pub fn seed_ids(&mut self, store: &LocationHistoryStore) -> Result<(), StorageError> {
        let max = store.max_id()?;
        if max > self.ids.last() {
            self.ids = IdGenerator::starting_after(max);
        }
        Ok(())
    }

    /// States the most recent capture went through, starting at
    /// `PermissionRequested`. Empty before the first capture.
    pub fn transitions(&self) -> &[CaptureState] {
        &self.transitions
    }

    /// Terminal state of the most recent capture (`Idle` before any).
    pub fn last_outcome(&self) -> CaptureState {
        self.transitions.last().copied().unwrap_or_default()
    }

    fn enter(&mut self, state: CaptureState) {
        tracing::debug!("Capture state: {:?}", state);
        self.transitions.push(state);
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Request permission, read the position, and append it to `store`.
    ///
    /// Returns the stored record so callers can prepend it to a cached list.
    pub async fn capture_and_store(
        &mut self,
        store: &LocationHistoryStore,
    ) -> Result<LocationRecord, CaptureError> {
        self.transitions.clear();
        let result = self.run(store).await;

        match &result {
            Ok(record) => tracing::info!(
                "Captured location {} ({}, {})",
                record.id,
                record.latitude,
                record.longitude
            ),
            Err(CaptureError::PermissionDenied) => {
                tracing::warn!("Location permission denied");
            }
            Err(e) => tracing::error!("Failed to capture location: {}", e),
        }

        result
    }

    async fn run(&mut self, store: &LocationHistoryStore) -> Result<LocationRecord, CaptureError> {
        self.enter(CaptureState::PermissionRequested);
        let permission = self.provider.request_foreground_permission().await;

        if !permission.is_granted() {
            self.enter(CaptureState::Denied);
            return Err(CaptureError::PermissionDenied);
        }
        self.enter(CaptureState::Granted);
        self.enter(CaptureState::Capturing);
        let coords = match self.provider.get_current_position(self.accuracy).await {
            Ok(coords) if coords.is_valid() => coords,
            Ok(coords) => {
                self.enter(CaptureState::Failure);
                return Err(LocationError::InvalidCoordinates {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                }
                .into());
            }
            Err(e) => {
                self.enter(CaptureState::Failure);
                return Err(e.into());
            }
        };

        let Some(id) = self.ids.next_id() else {
            self.enter(CaptureState::Failure);
            return Err(CaptureError::IdsExhausted);
        };
        let record = LocationRecord::new(id, coords);

        if let Err(e) = store.insert(&record) {
            self.enter(CaptureState::Failure);
            return Err(e.into());
        }

        self.enter(CaptureState::Success);
        Ok(record)
    }
}
