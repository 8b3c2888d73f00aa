// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag tracker: per-sample deltas and total displacement.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] with the press position.
//! 2) On each move, call [`DragState::update`] for the delta since the previous sample.
//! 3) Call [`DragState::offset`] (or [`DragState::exceeds`]) for the displacement from the press.
//! 4) Call [`DragState::end`] on release or cancel.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use corkboard_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(Point::new(18.0, 29.0)), Some(Vec2::new(3.0, 4.0)));
//! assert_eq!(drag.offset(Point::new(18.0, 29.0)), Some(Vec2::new(8.0, 9.0)));
//! assert!(drag.exceeds(Point::new(18.0, 29.0), 5.0));
//! ```

use kurbo::{Point, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Anchor {
    start: Point,
    last: Point,
}

/// Tracks one pointer from press to release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    anchor: Option<Anchor>,
}

impl DragState {
    /// Starts tracking from `pos`, replacing any previous drag.
    pub fn start(&mut self, pos: Point) {
        self.anchor = Some(Anchor {
            start: pos,
            last: pos,
        });
    }

    /// Records a new sample and returns the delta from the previous one.
    ///
    /// Returns `None` when no drag is active or the sample is not finite; a
    /// rejected sample does not move the tracker.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        if !pos.is_finite() {
            return None;
        }
        let anchor = self.anchor.as_mut()?;
        let delta = pos - anchor.last;
        anchor.last = pos;
        Some(delta)
    }

    /// Displacement of `pos` from the press position.
    #[must_use]
    pub fn offset(&self, pos: Point) -> Option<Vec2> {
        self.anchor.map(|a| pos - a.start)
    }

    /// Returns `true` when `pos` is at least `threshold` pixels from the press.
    #[must_use]
    pub fn exceeds(&self, pos: Point, threshold: f64) -> bool {
        self.offset(pos)
            .is_some_and(|d| d.hypot2() >= threshold * threshold)
    }

    /// Press position of the active drag.
    #[must_use]
    pub fn start_position(&self) -> Option<Point> {
        self.anchor.map(|a| a.start)
    }

    /// Most recent accepted sample of the active drag.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.anchor.map(|a| a.last)
    }

    /// Ends the drag, returning its press position.
    pub fn end(&mut self) -> Option<Point> {
        self.anchor.take().map(|a| a.start)
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}
