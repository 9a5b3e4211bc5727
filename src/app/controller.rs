//! Keyboard controller: routes platform touch events to calibration or zones.

use tracing::{debug, error, info, warn};

use crate::app::component::{Component, KeyboardContext, ZoneView};
use crate::app::events::KeyboardEvent;
use crate::error::{KeyboardError, KeyboardResult};
use crate::input::{Calibration, TouchId, TouchRouter, ZoneGesture};
use crate::models::ZoneCollection;
use crate::services::geometry::Point;
use crate::services::layout_store::{LayoutStorage, LayoutStore};

/// Interaction mode of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Touches draw zone placements
    Calibrating,
    /// Touches select characters
    Typing,
}

/// Owns the zones, their gesture resolvers, the touch router, calibration
/// state and the layout store.
///
/// All handlers run to completion on the caller's thread; touches for one id
/// are expected in start, move*, end order.
#[derive(Debug)]
pub struct KeyboardApp<S> {
    zones: ZoneCollection,
    gestures: Vec<ZoneGesture>,
    router: TouchRouter,
    calibration: Calibration,
    calibration_touch: Option<TouchId>,
    store: LayoutStore<S>,
}

impl<S: LayoutStorage> KeyboardApp<S> {
    /// Boots from the store, falling back to the compiled-in layout, and saves
    /// the result back.
    pub fn boot(store: LayoutStore<S>, default_step: f64) -> KeyboardResult<Self> {
        let zones = store.load_or_default(default_step)?;
        let mut app = Self::with_zones(zones, store)?;
        app.persist();

        info!(
            zones = app.zones.len(),
            ready = app.is_ready(),
            "keyboard booted"
        );
        Ok(app)
    }

    /// Builds a controller around an existing layout without touching storage.
    pub fn with_zones(zones: ZoneCollection, store: LayoutStore<S>) -> KeyboardResult<Self> {
        let gestures = zones
            .iter()
            .map(ZoneGesture::for_zone)
            .collect::<KeyboardResult<Vec<_>>>()?;
        let calibration = Calibration::from_zones(&zones);

        Ok(Self {
            zones,
            gestures,
            router: TouchRouter::new(),
            calibration,
            calibration_touch: None,
            store,
        })
    }

    /// Current interaction mode.
    pub const fn mode(&self) -> Mode {
        if self.calibration.is_ready() {
            Mode::Typing
        } else {
            Mode::Calibrating
        }
    }

    /// Whether every zone is placed and typing is enabled.
    pub const fn is_ready(&self) -> bool {
        self.calibration.is_ready()
    }

    /// The zone layout.
    pub const fn zones(&self) -> &ZoneCollection {
        &self.zones
    }

    /// Calibration state.
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Touch bindings.
    pub const fn router(&self) -> &TouchRouter {
        &self.router
    }

    /// Gesture resolver of the zone at `index`.
    pub fn gesture(&self, index: usize) -> Option<&ZoneGesture> {
        self.gestures.get(index)
    }

    /// Layout store.
    pub const fn store(&self) -> &LayoutStore<S> {
        &self.store
    }

    /// Handles a touch beginning at `point`.
    ///
    /// `zone_id` is the zone whose hit region contains the point, as determined
    /// by the presentation layer; it is ignored while calibrating.
    pub fn touch_start(
        &mut self,
        touch_id: TouchId,
        point: Point,
        zone_id: Option<&str>,
    ) -> Vec<KeyboardEvent> {
        if !self.calibration.is_ready() {
            return self.calibration_start(touch_id, point);
        }

        let Some(zone_id) = zone_id else {
            debug!(touch_id, "touch started outside every zone");
            return Vec::new();
        };
        let Some(index) = self.zones.index_of(zone_id) else {
            warn!(touch_id, zone = zone_id, "touch started on unknown zone");
            return Vec::new();
        };

        self.router.bind(touch_id, index);
        let result = match (self.zones.get_mut(index), self.gestures.get_mut(index)) {
            (Some(zone), Some(gesture)) => gesture.on_touch_start(zone, point),
            _ => Err(Self::missing_zone(index)),
        };
        if let Err(e) = result {
            self.recover(index, &e);
        }
        Vec::new()
    }

    /// Handles a touch moving to `point`.
    pub fn touch_move(&mut self, touch_id: TouchId, point: Point) -> Vec<KeyboardEvent> {
        if !self.calibration.is_ready() {
            if self.calibration_touch != Some(touch_id) {
                return Vec::new();
            }
            return self
                .calibration
                .on_drag_move(point)
                .map(|preview| vec![KeyboardEvent::PreviewUpdated { preview }])
                .unwrap_or_default();
        }

        let Some(index) = self.router.resolve(touch_id) else {
            return Vec::new();
        };

        let result = match (self.zones.get_mut(index), self.gestures.get_mut(index)) {
            (Some(zone), Some(gesture)) => gesture
                .on_touch_move(zone, point)
                .map(|changed| changed.map(|_| (zone.id.clone(), zone.current_char().to_string()))),
            _ => Err(Self::missing_zone(index)),
        };

        match result {
            Ok(Some((zone_id, current_char))) => vec![KeyboardEvent::SelectionChanged {
                zone_id,
                current_char,
            }],
            Ok(None) => Vec::new(),
            Err(e) => {
                self.recover(index, &e);
                Vec::new()
            }
        }
    }

    /// Handles a touch ending.
    ///
    /// `active_touches` is the number of touches the platform still reports
    /// as down; when it is zero every remaining binding is dropped.
    pub fn touch_end(&mut self, touch_id: TouchId, active_touches: usize) -> Vec<KeyboardEvent> {
        let events = if self.calibration_touch == Some(touch_id) {
            self.calibration_touch = None;
            self.calibration_end()
        } else if let Some(index) = self.router.release(touch_id) {
            self.zone_end(index)
        } else {
            Vec::new()
        };

        if active_touches == 0 {
            self.resync();
        }
        events
    }

    /// Restarts calibration: every zone becomes unpositioned and the next
    /// drag places zone 0 again.
    pub fn reset(&mut self) -> Vec<KeyboardEvent> {
        self.calibration.reset(&mut self.zones);
        self.calibration_touch = None;
        self.router.resync_if_empty(0);

        for index in 0..self.gestures.len() {
            let result = match (self.zones.get_mut(index), self.gestures.get_mut(index)) {
                (Some(zone), Some(gesture)) => gesture.reset(zone),
                _ => Err(Self::missing_zone(index)),
            };
            if let Err(e) = result {
                error!(zone_index = index, error = %e, "failed to reset zone");
            }
        }

        self.persist();
        info!("calibration reset");
        vec![KeyboardEvent::CalibrationReset]
    }

    fn calibration_start(&mut self, touch_id: TouchId, point: Point) -> Vec<KeyboardEvent> {
        if let Some(active) = self.calibration_touch {
            if active != touch_id {
                debug!(touch_id, active, "ignoring extra touch during calibration");
                return Vec::new();
            }
        }

        if !self.calibration.on_drag_start(point) {
            return Vec::new();
        }
        self.calibration_touch = Some(touch_id);
        self.calibration
            .preview()
            .map(|preview| vec![KeyboardEvent::PreviewUpdated { preview: *preview }])
            .unwrap_or_default()
    }

    fn calibration_end(&mut self) -> Vec<KeyboardEvent> {
        let Some(commit) = self.calibration.on_drag_end(&mut self.zones) else {
            return Vec::new();
        };

        let mut events = vec![KeyboardEvent::ZoneCommitted {
            zone_index: commit.zone_index,
            zone_id: commit.zone_id,
        }];
        if commit.ready {
            events.push(KeyboardEvent::CalibrationReady);
        }

        self.persist();
        events
    }

    fn zone_end(&mut self, index: usize) -> Vec<KeyboardEvent> {
        let result = match (self.zones.get_mut(index), self.gestures.get_mut(index)) {
            (Some(zone), Some(gesture)) => gesture
                .on_touch_end(zone)
                .map(|selection| selection.map(|s| (zone.id.clone(), s))),
            _ => Err(Self::missing_zone(index)),
        };

        match result {
            Ok(Some((zone_id, selection))) => {
                debug!(zone = %zone_id, id = %selection.id, "character selected");
                vec![KeyboardEvent::CharacterSelected { zone_id, selection }]
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                self.recover(index, &e);
                Vec::new()
            }
        }
    }

    /// Drops every binding and parks any drag left without a touch.
    fn resync(&mut self) {
        if let Some(orphan) = self.calibration_touch.take() {
            debug!(touch_id = orphan, "dropping calibration touch without an end");
            self.calibration.cancel_drag();
        }

        if self.router.resync_if_empty(0) == 0 {
            return;
        }

        for index in 0..self.gestures.len() {
            if !self.gestures[index].is_dragging() {
                continue;
            }
            let result = match self.zones.get_mut(index) {
                Some(zone) => self.gestures[index].reset(zone),
                None => Err(Self::missing_zone(index)),
            };
            if let Err(e) = result {
                error!(zone_index = index, error = %e, "failed to reset orphaned drag");
            }
        }
    }

    /// Falls back to the zone's reset state after a gesture error.
    fn recover(&mut self, index: usize, err: &KeyboardError) {
        error!(zone_index = index, error = %err, "gesture failed, resetting zone");

        if let (Some(zone), Some(gesture)) = (self.zones.get_mut(index), self.gestures.get_mut(index)) {
            if let Err(e) = gesture.reset(zone) {
                error!(zone_index = index, error = %e, "zone reset failed");
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.zones) {
            warn!(error = %e, "failed to save layout");
        }
    }

    fn missing_zone(index: usize) -> KeyboardError {
        KeyboardError::configuration(format!("no zone at index {index}"))
    }
}

impl<S: LayoutStorage> Component for KeyboardApp<S> {
    type Context = KeyboardContext;

    fn context(&self) -> KeyboardContext {
        KeyboardContext {
            ready: self.is_ready(),
            pending_zone_index: self.calibration.pending_zone_index(),
            preview: self.calibration.preview().copied(),
            zones: self
                .zones
                .iter()
                .zip(&self.gestures)
                .map(|(zone, gesture)| ZoneView { zone, gesture }.context())
                .collect(),
        }
    }
}
