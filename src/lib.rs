//! Fingerboard Library
//!
//! Core of a split, multi-zone drag keyboard: each zone holds a character set
//! and the user picks a character by dragging along the zone's axis. Zones are
//! placed on screen by an interactive calibration and persisted as JSON.

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod models;
pub mod services;

pub use error::{KeyboardError, KeyboardResult};
