// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-or-move protocol for repositioning an entity by dragging it.
//!
//! A press on an entity starts a session. Until the pointer has moved at
//! least `threshold` screen pixels from the press, the session is only
//! *pressed*; releasing it then is a click. Once the threshold is crossed
//! the session is *dragging*: every move yields a visual world position, and
//! the release yields exactly one committed position. Crossing is sticky, so
//! a drag that returns to its start still commits.
//!
//! The visual and committed position is `start_world + delta` where `delta`
//! is the screen displacement since the press. With
//! [`DragTracking::World`] the delta is divided by the zoom first, so the
//! entity stays under the pointer at any zoom.
//!
//! Cancelling a session never commits; it hands back the position the
//! entity should snap back to.

use kurbo::{Point, Vec2};

use crate::drag::DragState;

/// Default click/move threshold in screen pixels.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// How screen displacement maps onto world displacement while dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragTracking {
    /// One screen pixel moves the entity one world unit, regardless of zoom.
    #[default]
    Screen,
    /// Screen displacement is divided by the zoom, keeping the entity under
    /// the pointer.
    World,
}

/// Observable phase of a [`RepositionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepositionPhase {
    /// No session.
    Idle,
    /// Pressed on an entity; threshold not crossed yet.
    Pressed,
    /// Threshold crossed; the entity follows the pointer.
    Dragging,
}

/// Outcome of releasing a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release<K> {
    /// The pointer never moved far enough: select the entity.
    Click(K),
    /// The entity was moved: commit this world position once.
    Commit {
        /// Entity that was dragged.
        key: K,
        /// Final world position.
        position: Point,
    },
}

/// Outcome of cancelling a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cancelled<K> {
    /// Entity whose session was discarded.
    pub key: K,
    /// Last committed world position to restore.
    pub restore: Point,
    /// Whether the entity had been visually moved.
    pub was_dragging: bool,
}

#[derive(Clone, Debug)]
struct Session<K> {
    key: K,
    start_world: Point,
    crossed: bool,
}

/// Drag-to-reposition state for a single pointer device.
#[derive(Clone, Debug)]
pub struct RepositionState<K> {
    drag: DragState,
    session: Option<Session<K>>,
    threshold: f64,
    tracking: DragTracking,
}

impl<K: Clone> RepositionState<K> {
    /// Creates an idle state with the given threshold and screen tracking.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.max(0.0)
        } else {
            DEFAULT_DRAG_THRESHOLD
        };
        Self {
            drag: DragState::default(),
            session: None,
            threshold,
            tracking: DragTracking::Screen,
        }
    }

    /// Sets how displacement is mapped into world space.
    #[must_use]
    pub fn with_tracking(mut self, tracking: DragTracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Click/move threshold in screen pixels.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current tracking mode.
    #[must_use]
    pub fn tracking(&self) -> DragTracking {
        self.tracking
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RepositionPhase {
        match &self.session {
            None => RepositionPhase::Idle,
            Some(Session { crossed: false, .. }) => RepositionPhase::Pressed,
            Some(Session { crossed: true, .. }) => RepositionPhase::Dragging,
        }
    }

    /// Entity of the active session, if any.
    #[must_use]
    pub fn key(&self) -> Option<K> {
        self.session.as_ref().map(|s| s.key.clone())
    }

    /// Starts a session on `key`.
    ///
    /// `start_world` is the entity's last committed world position. Any
    /// previous session is discarded without committing. Returns `false` and
    /// stays idle if either position is not finite.
    pub fn press(&mut self, key: K, screen: Point, start_world: Point) -> bool {
        if !screen.is_finite() || !start_world.is_finite() {
            self.reset();
            return false;
        }
        self.drag.start(screen);
        self.session = Some(Session {
            key,
            start_world,
            crossed: false,
        });
        true
    }

    /// Feeds a pointer move.
    ///
    /// Returns the entity's visual world position once the session is
    /// dragging, `None` otherwise.
    pub fn update(&mut self, screen: Point, zoom: f64) -> Option<Point> {
        let threshold = self.threshold;
        let session = self.session.as_mut()?;
        self.drag.update(screen)?;
        if !session.crossed && self.drag.exceeds(screen, threshold) {
            session.crossed = true;
        }
        if !session.crossed {
            return None;
        }
        let start = session.start_world;
        self.position_for(start, screen, zoom)
    }

    /// Ends the session at `screen`.
    ///
    /// Classification uses the release displacement as well, so a press and
    /// release without intermediate moves is still a move when far enough.
    /// A non-finite release position falls back to the last accepted sample.
    pub fn release(&mut self, screen: Point, zoom: f64) -> Option<Release<K>> {
        let session = self.session.take()?;
        let screen = if screen.is_finite() {
            screen
        } else {
            self.drag.last_position().unwrap_or(screen)
        };
        let crossed = session.crossed || self.drag.exceeds(screen, self.threshold);
        let delta = self.drag.offset(screen).unwrap_or(Vec2::ZERO);
        self.drag.end();
        if !crossed {
            return Some(Release::Click(session.key));
        }
        Some(Release::Commit {
            key: session.key,
            position: session.start_world + self.world_delta(delta, zoom),
        })
    }

    /// Discards the session without committing.
    pub fn cancel(&mut self) -> Option<Cancelled<K>> {
        self.drag.end();
        self.session.take().map(|s| Cancelled {
            key: s.key,
            restore: s.start_world,
            was_dragging: s.crossed,
        })
    }

    fn reset(&mut self) {
        self.drag.end();
        self.session = None;
    }

    fn position_for(&self, start_world: Point, screen: Point, zoom: f64) -> Option<Point> {
        let delta = self.drag.offset(screen)?;
        Some(start_world + self.world_delta(delta, zoom))
    }

    fn world_delta(&self, delta: Vec2, zoom: f64) -> Vec2 {
        match self.tracking {
            DragTracking::World if zoom.is_finite() && zoom > 0.0 => delta / zoom,
            _ => delta,
        }
    }
}
