//! Events emitted by the keyboard controller.

use serde::Serialize;

use crate::input::PreviewVector;
use crate::models::SelectionEvent;

/// Something the controller wants its collaborators (renderer, text buffer) to know.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum KeyboardEvent {
    /// A zone drag ended and committed a character
    CharacterSelected {
        /// Zone that produced the selection
        zone_id: String,
        /// Committed entry
        selection: SelectionEvent,
    },

    /// The selection shown on a zone changed mid-drag
    SelectionChanged {
        /// Zone whose selection changed
        zone_id: String,
        /// Title now displayed on the zone
        current_char: String,
    },

    /// The calibration drag moved
    PreviewUpdated {
        /// Current preview of the zone being drawn
        preview: PreviewVector,
    },

    /// Calibration placed a zone
    ZoneCommitted {
        /// Index of the placed zone
        zone_index: usize,
        /// Id of the placed zone
        zone_id: String,
    },

    /// Every zone is placed; typing is enabled
    CalibrationReady,

    /// Calibration restarted from the first zone
    CalibrationReset,
}

impl KeyboardEvent {
    /// The committed selection, if this is a selection event.
    pub fn selection(&self) -> Option<&SelectionEvent> {
        match self {
            Self::CharacterSelected { selection, .. } => Some(selection),
            _ => None,
        }
    }
}
