//! Multi-touch routing: keeps each live touch bound to the zone it started on.

use std::collections::HashMap;

use tracing::debug;

/// Platform touch identifier.
pub type TouchId = u64;

/// Table of live touches and the zone (by index) that claimed each one.
///
/// Bindings are created at touch-start, looked up on move/end and removed on
/// end. When the platform reports that no touches remain active the whole
/// table is cleared, which also drops bindings orphaned by touches that never
/// delivered an end event.
///
/// Known limitation: if the platform briefly reports an empty touch list while
/// a touch is in fact still down, that touch loses its binding and its
/// remaining moves are ignored.
#[derive(Debug, Clone, Default)]
pub struct TouchRouter {
    bindings: HashMap<TouchId, usize>,
}

impl TouchRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `touch_id` to the zone at `zone_index`, replacing any earlier binding.
    pub fn bind(&mut self, touch_id: TouchId, zone_index: usize) {
        if let Some(previous) = self.bindings.insert(touch_id, zone_index) {
            debug!(touch_id, previous, zone_index, "touch rebound");
        }
    }

    /// Zone bound to `touch_id`, if any.
    pub fn resolve(&self, touch_id: TouchId) -> Option<usize> {
        self.bindings.get(&touch_id).copied()
    }

    /// Removes the binding for `touch_id`, returning the zone it was bound to.
    pub fn release(&mut self, touch_id: TouchId) -> Option<usize> {
        self.bindings.remove(&touch_id)
    }

    /// Clears every binding when the platform reports zero active touches.
    ///
    /// Returns the number of bindings dropped.
    pub fn resync_if_empty(&mut self, active_touch_count: usize) -> usize {
        if active_touch_count > 0 || self.bindings.is_empty() {
            return 0;
        }

        let dropped = self.bindings.len();
        self.bindings.clear();
        debug!(dropped, "no active touches reported, cleared touch bindings");
        dropped
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no touches are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
