//! Application orchestration layer
//!
//! Ties the zone models, gesture resolvers, touch router, calibration and
//! persistence together behind a single event-driven controller.

/// Renderer-facing component contract and context snapshots
pub mod component;

/// Touch-event controller
pub mod controller;

pub mod events;

// Re-export commonly used types for convenience
pub use component::{Component, KeyboardContext, ZoneContext, ZoneView};
pub use controller::{KeyboardApp, Mode};
pub use events::KeyboardEvent;
