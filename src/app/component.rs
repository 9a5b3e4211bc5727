//! Component contract for presentation layers.
//!
//! Rendering happens outside this crate. A renderer asks each component for a
//! serializable snapshot of what it needs to draw; components never hold
//! references to view objects.

use serde::Serialize;

use crate::input::{PreviewVector, ZoneGesture};
use crate::models::Zone;

/// Something that can describe itself to a renderer.
pub trait Component {
    /// Snapshot type handed to the renderer
    type Context: Serialize;

    /// Builds the current render context.
    fn context(&self) -> Self::Context;
}

/// Render context of one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneContext {
    /// Zone id (also the CSS/class-style hook for the renderer)
    pub id: String,
    /// Title of the selected entry
    pub current_char: String,
    /// Screen-space anchor (y)
    pub top: f64,
    /// Screen-space anchor (x)
    pub left: f64,
    /// Rotation in degrees
    pub angle: f64,
    /// Pad position along the local axis
    pub pad_offset: f64,
    /// Whether a drag is in progress
    pub dragging: bool,
    /// Whether calibration has placed the zone
    pub is_positioned: bool,
}

/// A zone paired with its gesture state.
#[derive(Debug, Clone, Copy)]
pub struct ZoneView<'a> {
    /// The zone
    pub zone: &'a Zone,
    /// Its gesture resolver
    pub gesture: &'a ZoneGesture,
}

impl Component for ZoneView<'_> {
    type Context = ZoneContext;

    fn context(&self) -> ZoneContext {
        ZoneContext {
            id: self.zone.id.clone(),
            current_char: self.zone.current_char().to_string(),
            top: self.zone.top,
            left: self.zone.left,
            angle: self.zone.angle,
            pad_offset: self.gesture.pad_offset(),
            dragging: self.gesture.is_dragging(),
            is_positioned: self.zone.is_positioned(),
        }
    }
}

/// Render context of the whole keyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardContext {
    /// Whether typing is enabled
    pub ready: bool,
    /// Zone awaiting calibration (equals the zone count once ready)
    pub pending_zone_index: usize,
    /// Calibration drag being drawn
    pub preview: Option<PreviewVector>,
    /// Per-zone contexts in layout order
    pub zones: Vec<ZoneContext>,
}
