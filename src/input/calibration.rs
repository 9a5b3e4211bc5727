//! Interactive calibration: the user draws each zone in turn.
//!
//! One press-drag-release places one zone. The drag's start point becomes the
//! zone's anchor and the drag direction its angle; zones are placed in order
//! until every zone is positioned, at which point the keyboard is ready and
//! calibration stops consuming touches.

use tracing::{debug, info};

use crate::models::ZoneCollection;
use crate::services::geometry::{vector_length, vector_to_angle_degrees, Point};

/// Live feedback for the drag currently being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct PreviewVector {
    /// Where the drag began (becomes the zone anchor)
    pub start: Point,
    /// Where the drag is now
    pub current: Point,
    /// Angle of `start -> current` in degrees
    pub angle: f64,
    /// Length of `start -> current` in pixels
    pub length: f64,
}

impl PreviewVector {
    fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
            angle: 0.0,
            length: 0.0,
        }
    }

    fn update(&mut self, current: Point) {
        let (dx, dy) = current.delta_from(self.start);
        self.current = current;
        self.angle = vector_to_angle_degrees(dx, dy);
        self.length = vector_length(dx, dy);
    }
}

/// Calibration phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// Waiting for the user to start drawing zone `i`
    AwaitingZone(usize),
    /// Zone `i` is being drawn
    Previewing(usize),
    /// Every zone is positioned
    Ready,
}

/// Result of committing one drawn zone.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationCommit {
    /// Index of the zone that was placed
    pub zone_index: usize,
    /// Id of the zone that was placed
    pub zone_id: String,
    /// The drawn vector
    pub preview: PreviewVector,
    /// Whether this commit completed calibration
    pub ready: bool,
}

/// Process-wide calibration state.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pending_zone_index: usize,
    zone_count: usize,
    preview: Option<PreviewVector>,
}

impl Calibration {
    /// Starts calibration from zone 0 for `zone_count` zones.
    pub fn new(zone_count: usize) -> Self {
        Self {
            pending_zone_index: 0,
            zone_count,
            preview: None,
        }
    }

    /// Resumes calibration at the first zone still lacking a position, or
    /// starts ready when every zone is already placed.
    pub fn from_zones(zones: &ZoneCollection) -> Self {
        Self {
            pending_zone_index: zones.next_unpositioned(0).unwrap_or(zones.len()),
            zone_count: zones.len(),
            preview: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CalibrationPhase {
        if self.is_ready() {
            CalibrationPhase::Ready
        } else if self.preview.is_some() {
            CalibrationPhase::Previewing(self.pending_zone_index)
        } else {
            CalibrationPhase::AwaitingZone(self.pending_zone_index)
        }
    }

    /// Whether every zone has been placed.
    pub const fn is_ready(&self) -> bool {
        self.pending_zone_index >= self.zone_count
    }

    /// Index of the next zone awaiting placement.
    pub const fn pending_zone_index(&self) -> usize {
        self.pending_zone_index
    }

    /// The drag being drawn, if any.
    pub const fn preview(&self) -> Option<&PreviewVector> {
        self.preview.as_ref()
    }

    /// Starts drawing the pending zone. Ignored once ready.
    pub fn on_drag_start(&mut self, point: Point) -> bool {
        if self.is_ready() {
            return false;
        }
        self.preview = Some(PreviewVector::new(point));
        true
    }

    /// Updates the preview angle and length.
    pub fn on_drag_move(&mut self, point: Point) -> Option<PreviewVector> {
        if self.is_ready() {
            return None;
        }
        let preview = self.preview.as_mut()?;
        preview.update(point);
        Some(*preview)
    }

    /// Commits the drawn vector to the pending zone and advances.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn on_drag_end(&mut self, zones: &mut ZoneCollection) -> Option<CalibrationCommit> {
        if self.is_ready() {
            return None;
        }
        let preview = self.preview.take()?;

        let zone_index = self.pending_zone_index;
        let zone = zones.get_mut(zone_index)?;
        zone.place(preview.angle, preview.start);
        let zone_id = zone.id.clone();

        self.pending_zone_index = zones
            .next_unpositioned(zone_index + 1)
            .unwrap_or(self.zone_count);

        let ready = self.is_ready();
        info!(
            zone = %zone_id,
            angle = preview.angle,
            top = preview.start.y,
            left = preview.start.x,
            "zone positioned"
        );
        if ready {
            info!("calibration complete, keyboard ready");
        }

        Some(CalibrationCommit {
            zone_index,
            zone_id,
            preview,
            ready,
        })
    }

    /// Discards the drag being drawn without placing anything.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.preview.take().is_some();
        if cancelled {
            debug!(zone_index = self.pending_zone_index, "calibration drag cancelled");
        }
        cancelled
    }

    /// Returns to zone 0 and marks every zone as unpositioned.
    pub fn reset(&mut self, zones: &mut ZoneCollection) {
        zones.clear_positions();
        self.pending_zone_index = 0;
        self.zone_count = zones.len();
        self.preview = None;
        debug!(zones = self.zone_count, "calibration reset");
    }
}
