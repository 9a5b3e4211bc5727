//! Touch input handling.
//!
//! - [`gesture`]: per-zone drag-to-character resolution
//! - [`touch_router`]: binds concurrent touches to the zone they started on
//! - [`calibration`]: the zone-drawing workflow that gates typing

pub mod calibration;
pub mod gesture;
pub mod touch_router;

pub use calibration::{Calibration, CalibrationCommit, CalibrationPhase, PreviewVector};
pub use gesture::{index_from_top, initial_top, GestureSession, GestureState, ZoneGesture};
pub use touch_router::{TouchId, TouchRouter};
