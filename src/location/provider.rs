//! Platform location collaborators.
//!
//! The permission prompt and the position sensor are accessed through
//! [`LocationProvider`]. Desktop builds use [`FixedLocationProvider`],
//! which answers from configuration.

use crate::location::types::{Accuracy, Coordinates, LocationError, PermissionStatus};
use crate::storage::config::LocationSettings;

/// Trait for platform location access.
pub trait LocationProvider: Send + Sync {
    /// Ask the platform for foreground location permission.
    fn request_foreground_permission(
        &self,
    ) -> impl std::future::Future<Output = PermissionStatus> + Send;

    /// Read the current device position once.
    fn get_current_position(
        &self,
        accuracy: Accuracy,
    ) -> impl std::future::Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Provider that answers from configuration.
///
/// Without a configured position every read fails as an unavailable sensor.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    permission: PermissionStatus,
    position: Option<Coordinates>,
}

impl FixedLocationProvider {
    /// Create a provider with an explicit permission answer and position.
    pub fn new(permission: PermissionStatus, position: Option<Coordinates>) -> Self {
        Self {
            permission,
            position,
        }
    }

    /// Create a provider from location settings.
    pub fn from_settings(settings: &LocationSettings) -> Self {
        let permission = if settings.permission_granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        Self::new(permission, settings.fixed_position)
    }
}

impl LocationProvider for FixedLocationProvider {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        tracing::debug!("Foreground location permission: {:?}", self.permission);
        self.permission
    }

    async fn get_current_position(&self, accuracy: Accuracy) -> Result<Coordinates, LocationError> {
        tracing::debug!("Reading fixed position at {} accuracy", accuracy);

        let position = self
            .position
            .ok_or_else(|| LocationError::SensorUnavailable("no position configured".into()))?;

        Coordinates::new(position.latitude, position.longitude)
    }
}
