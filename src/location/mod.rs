//! Location capture: platform collaborators, id issuance and the capture workflow.

pub mod capture;
pub mod id_generator;
pub mod provider;
pub mod types;

pub use capture::{CaptureError, CaptureState, CaptureWorkflow};
pub use id_generator::IdGenerator;
pub use provider::{FixedLocationProvider, LocationProvider};
pub use types::{Accuracy, Coordinates, LocationError, LocationRecord, PermissionStatus};
