//! GeoLog - Location Capture Log
//!
//! Captures the device position on demand, keeps every capture in a local
//! SQLite history, and remembers a light/dark theme preference.

pub mod location;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use location::capture::{CaptureError, CaptureWorkflow};
pub use location::types::LocationRecord;
pub use storage::config::{AppConfig, Theme};
pub use storage::history::LocationHistoryStore;
pub use ui::state::{AppState, LocationApp};
