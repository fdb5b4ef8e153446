//! Location types shared by the capture workflow and the history store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accuracy level requested from the position sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    /// City-level, cheapest fix
    Lowest,
    /// Roughly kilometre-level
    Low,
    /// Roughly hundred-metre-level
    Balanced,
    /// Roughly ten-metre-level (default)
    #[default]
    High,
    /// Best the device can do
    Highest,
    /// Best accuracy with extra sensor fusion
    BestForNavigation,
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accuracy::Lowest => write!(f, "Lowest"),
            Accuracy::Low => write!(f, "Low"),
            Accuracy::Balanced => write!(f, "Balanced"),
            Accuracy::High => write!(f, "High"),
            Accuracy::Highest => write!(f, "Highest"),
            Accuracy::BestForNavigation => write!(f, "Best for Navigation"),
        }
    }
}

/// Answer to a foreground permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        *self == PermissionStatus::Granted
    }
}

/// A latitude/longitude pair in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create validated coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let coords = Self {
            latitude,
            longitude,
        };
        if coords.is_valid() {
            Ok(coords)
        } else {
            Err(LocationError::InvalidCoordinates {
                latitude,
                longitude,
            })
        }
    }

    /// Check that both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One captured location, as persisted in the history store.
///
/// Records are immutable once written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Unique, never reused
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    pub fn new(id: i64, coords: Coordinates) -> Self {
        Self {
            id,
            latitude: coords.latitude,
            longitude: coords.longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// List item title.
    pub fn title(&self) -> String {
        format!("Location {}", self.id)
    }

    /// List item description.
    pub fn description(&self) -> String {
        format!(
            "Latitude: {} | Longitude: {}",
            self.latitude, self.longitude
        )
    }
}

/// Errors reported by the platform location collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}
