//! Per-zone gesture resolution.
//!
//! Each zone runs a small `Idle -> Dragging -> Idle` state machine. A drag is
//! projected onto the zone's local vertical axis and the running position is
//! snapped to the nearest character.
//!
//! # Coordinates
//!
//! `current_top` is the centre of the zone's pad along the local axis: entry
//! `i` is centred at `step * i + step / 2`. Resolution removes the half step
//! and works on the nominal coordinate where entry `i` sits at `step * i`
//! (see [`index_from_top`]).

use crate::error::KeyboardResult;
use crate::models::{SelectionEvent, Zone};
use crate::services::geometry::{rotate_local_vertical, Point};

/// Transient state of one touch-drag on a zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Screen-space anchor of the drag
    pub start: Point,
    /// Pad position of the initial entry when the drag began
    pub initial_top: f64,
    /// Running pad position along the local axis
    pub current_top: f64,
}

/// Gesture state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No drag in progress
    #[default]
    Idle,
    /// A drag is in progress
    Dragging(GestureSession),
}

/// Resolves touch input on a single zone into character selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneGesture {
    state: GestureState,
    pad_offset: f64,
}

/// Pad position of the zone's initial entry: `step * initial_index + step / 2`.
pub fn initial_top(zone: &Zone) -> KeyboardResult<f64> {
    let index = zone.char_set().initial_index()?;
    Ok(zone.step.mul_add(index as f64, zone.step / 2.0))
}

/// Maps a nominal local-axis coordinate to an entry index.
///
/// Entry `i` sits at `step * i` and owns the catchment
/// `(step * (i - 1/2), step * (i + 1/2)]`: a position exactly half a step past
/// an entry still resolves to it, anything beyond moves on. The result is
/// clamped to `[0, len - 1]`; there is no wraparound.
pub fn index_from_top(top: f64, step: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let raw = (top / step - 0.5).ceil();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        // Float-to-int casts saturate, so huge positions clamp to the last entry
        (raw as usize).min(len - 1)
    }
}

impl ZoneGesture {
    /// Creates an idle gesture resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle resolver with the pad parked on the zone's initial entry.
    pub fn for_zone(zone: &Zone) -> KeyboardResult<Self> {
        Ok(Self {
            state: GestureState::Idle,
            pad_offset: initial_top(zone)?,
        })
    }

    /// Current state.
    pub const fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a drag is in progress.
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Visual pad position along the local axis.
    pub const fn pad_offset(&self) -> f64 {
        self.pad_offset
    }

    /// Begins a drag at `point`.
    ///
    /// A second touch-start while already dragging replaces the running
    /// session; concurrent drags within one zone are not supported.
    pub fn on_touch_start(&mut self, zone: &mut Zone, point: Point) -> KeyboardResult<()> {
        let top = initial_top(zone)?;
        zone.reset_selection()?;

        self.state = GestureState::Dragging(GestureSession {
            start: point,
            initial_top: top,
            current_top: top,
        });
        self.pad_offset = top;
        Ok(())
    }

    /// Updates the drag with the touch now at `point`.
    ///
    /// Returns the newly selected index when the selection changed. Moves while
    /// idle are ignored.
    pub fn on_touch_move(&mut self, zone: &mut Zone, point: Point) -> KeyboardResult<Option<usize>> {
        let GestureState::Dragging(session) = &mut self.state else {
            return Ok(None);
        };

        let (dx, dy) = point.delta_from(session.start);
        let offset = rotate_local_vertical(dx, dy, zone.angle);
        session.current_top = session.initial_top + offset;
        self.pad_offset = session.current_top;

        let index = index_from_top(
            session.current_top - zone.step / 2.0,
            zone.step,
            zone.char_set().len(),
        );

        if zone.char_set().selected_index() == Some(index) {
            return Ok(None);
        }
        zone.select_at(index)?;
        Ok(Some(index))
    }

    /// Ends the drag, returning the committed selection and resetting the zone.
    ///
    /// Ends while idle (e.g. a session replaced by a later touch) commit nothing.
    pub fn on_touch_end(&mut self, zone: &mut Zone) -> KeyboardResult<Option<SelectionEvent>> {
        if !self.is_dragging() {
            return Ok(None);
        }

        let event = zone.selected().map(SelectionEvent::from);
        self.reset(zone)?;
        Ok(event)
    }

    /// Returns to idle with the initial entry selected and the pad parked on it.
    pub fn reset(&mut self, zone: &mut Zone) -> KeyboardResult<()> {
        self.state = GestureState::Idle;
        self.pad_offset = initial_top(zone)?;
        zone.reset_selection()
    }
}
