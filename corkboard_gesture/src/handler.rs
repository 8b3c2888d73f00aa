// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_event_state::drag::DragState;
use kurbo::Point;
use smallvec::SmallVec;

use crate::{CameraAction, CameraTarget, PointerId, PointerInput};

/// Default zoom change per pixel of vertical wheel scroll.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.001;

/// Default zoom change per pixel of pinch distance change.
pub const DEFAULT_PINCH_SENSITIVITY: f64 = 0.01;

/// Tuning for [`GestureHandler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Zoom change per pixel of wheel scroll.
    pub wheel_sensitivity: f64,
    /// Zoom change per pixel of pinch distance change.
    pub pinch_sensitivity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            pinch_sensitivity: DEFAULT_PINCH_SENSITIVITY,
        }
    }
}

/// Current gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No contact is driving the camera.
    Idle,
    /// One contact drags the board.
    Panning,
    /// Two contacts pinch-zoom the board.
    Pinching,
}

#[derive(Clone, Copy, Debug)]
struct Contact {
    id: PointerId,
    position: Point,
}

/// Pan / pinch / wheel recognizer.
#[derive(Clone, Debug)]
pub struct GestureHandler {
    config: GestureConfig,
    phase: GesturePhase,
    contacts: SmallVec<[Contact; 4]>,
    pan: DragState,
    pan_contact: Option<PointerId>,
    pinch_distance: Option<f64>,
}

impl Default for GestureHandler {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureHandler {
    /// Creates an idle handler.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            contacts: SmallVec::new(),
            pan: DragState::default(),
            pan_contact: None,
            pinch_distance: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Number of contacts currently down.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` if `id` is one of the tracked contacts.
    #[must_use]
    pub fn is_tracking(&self, id: PointerId) -> bool {
        self.contacts.iter().any(|c| c.id == id)
    }

    /// Drops every contact and returns to [`GesturePhase::Idle`].
    pub fn reset(&mut self) {
        self.contacts.clear();
        self.end_pan();
        self.pinch_distance = None;
        self.phase = GesturePhase::Idle;
    }

    /// Feeds one input and applies the resulting action to `target`.
    ///
    /// Returns `true` if the target changed.
    pub fn encode<T: CameraTarget>(&mut self, input: &PointerInput, target: &mut T) -> bool {
        match self.process(input, target) {
            Some(action) => target.apply(action),
            None => false,
        }
    }

    /// Feeds one input and returns the camera action it produces, if any.
    ///
    /// `target` is only consulted for scroll line and page sizes.
    pub fn process<T: CameraTarget>(
        &mut self,
        input: &PointerInput,
        target: &T,
    ) -> Option<CameraAction> {
        if input.position().is_some_and(|p| !p.is_finite()) {
            return None;
        }
        match *input {
            PointerInput::Down { id, position, .. } => {
                self.on_down(id, position);
                None
            }
            PointerInput::Move { id, position } => self.on_move(id, position),
            PointerInput::Up { id, .. } | PointerInput::Cancel { id } => {
                self.on_up(id);
                None
            }
            PointerInput::Scroll { delta, .. } => {
                let pixels = delta.to_pixels(target.line_size(), target.page_size());
                let zoom = -pixels.y * self.config.wheel_sensitivity;
                (zoom != 0.0 && zoom.is_finite()).then_some(CameraAction::ZoomBy(zoom))
            }
        }
    }

    fn on_down(&mut self, id: PointerId, position: Point) {
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) {
            contact.position = position;
        } else {
            self.contacts.push(Contact { id, position });
        }
        match self.contacts.len() {
            0 => {}
            1 => {
                self.phase = GesturePhase::Panning;
                self.pan.start(position);
                self.pan_contact = Some(id);
            }
            _ => {
                self.end_pan();
                self.phase = GesturePhase::Pinching;
                self.pinch_distance = self.pair_distance();
            }
        }
    }

    fn on_move(&mut self, id: PointerId, position: Point) -> Option<CameraAction> {
        let contact = self.contacts.iter_mut().find(|c| c.id == id)?;
        contact.position = position;
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Panning => {
                if self.pan_contact != Some(id) {
                    return None;
                }
                let delta = self.pan.update(position)?;
                (delta.x != 0.0 || delta.y != 0.0).then_some(CameraAction::PanBy(delta))
            }
            GesturePhase::Pinching => {
                if !self.contacts.iter().take(2).any(|c| c.id == id) {
                    return None;
                }
                let current = self.pair_distance()?;
                let previous = self.pinch_distance.replace(current)?;
                let zoom = (current - previous) * self.config.pinch_sensitivity;
                (zoom != 0.0).then_some(CameraAction::ZoomBy(zoom))
            }
        }
    }

    fn on_up(&mut self, id: PointerId) {
        self.contacts.retain(|c| c.id != id);
        match self.phase {
            GesturePhase::Panning if self.pan_contact == Some(id) => {
                self.end_pan();
                self.phase = GesturePhase::Idle;
            }
            GesturePhase::Pinching if self.contacts.len() < 2 => {
                self.pinch_distance = None;
                self.phase = GesturePhase::Idle;
            }
            GesturePhase::Pinching => {
                // A third finger lifted or one of the pair was replaced.
                self.pinch_distance = self.pair_distance();
            }
            _ => {}
        }
        if self.contacts.is_empty() {
            self.reset();
        }
    }

    fn end_pan(&mut self) {
        self.pan.end();
        self.pan_contact = None;
    }

    fn pair_distance(&self) -> Option<f64> {
        match self.contacts.as_slice() {
            [a, b, ..] => Some(a.position.distance(b.position)),
            _ => None,
        }
    }
}
