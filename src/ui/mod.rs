//! Presentation state.

pub mod state;

pub use state::{AppState, LocationApp};
