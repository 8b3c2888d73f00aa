// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};

use crate::Camera;

/// Default buffer around the visible rectangle, in multiples of the screen
/// extent per axis.
pub const DEFAULT_BUFFER_FACTOR: f64 = 3.0;

/// Buffered world-space query window derived from a [`Camera`].
///
/// The window is the on-screen world rectangle grown on every side by
/// `buffer_factor` times the screen width (horizontally) and height
/// (vertically). With a positive buffer it always strictly contains the
/// visible rectangle, so small pans do not expose unfetched space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportWindow {
    /// Minimum world x.
    pub min_x: f64,
    /// Maximum world x.
    pub max_x: f64,
    /// Minimum world y.
    pub min_y: f64,
    /// Maximum world y.
    pub max_y: f64,
}

impl ViewportWindow {
    /// Computes the buffered window for the camera's current state.
    ///
    /// Fails closed: degenerate camera state (non-finite values, an empty
    /// screen) yields an error rather than a window that would propagate NaN
    /// into a fetch.
    pub fn around(camera: &Camera, buffer_factor: f64) -> Result<Self, BoundsError> {
        if !camera.is_valid() || !buffer_factor.is_finite() {
            return Err(BoundsError::NonFinite);
        }
        let screen = camera.screen_size();
        let factor = buffer_factor.max(0.0);
        let visible = camera.visible_world_rect();
        let buffered = visible.inflate(screen.width * factor, screen.height * factor);
        Self::from_rect(buffered)
    }

    /// Builds a window from a world-space rectangle, validating it.
    pub fn from_rect(rect: Rect) -> Result<Self, BoundsError> {
        let window = Self {
            min_x: rect.min_x(),
            max_x: rect.max_x(),
            min_y: rect.min_y(),
            max_y: rect.max_y(),
        };
        window.validate()?;
        Ok(window)
    }

    /// Checks that all bounds are finite and the window has positive area.
    pub fn validate(&self) -> Result<(), BoundsError> {
        let finite = self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite();
        if !finite {
            return Err(BoundsError::NonFinite);
        }
        if self.max_x <= self.min_x || self.max_y <= self.min_y {
            return Err(BoundsError::Empty);
        }
        Ok(())
    }

    /// Returns the window as a world-space rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Window width in world units.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Window height in world units.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the point lies inside the window (bounds inclusive).
    #[must_use]
    pub fn contains_point(&self, pt: Point) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }

    /// Returns `true` if `rect` lies inside the window (bounds inclusive).
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        rect.min_x() >= self.min_x
            && rect.max_x() <= self.max_x
            && rect.min_y() >= self.min_y
            && rect.max_y() <= self.max_y
    }
}

/// Reasons a viewport window is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsError {
    /// A bound (or the camera state it was derived from) is NaN or infinite.
    NonFinite,
    /// The window has zero or negative extent on some axis.
    Empty,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => f.write_str("viewport bounds are not finite"),
            Self::Empty => f.write_str("viewport bounds are empty"),
        }
    }
}

impl core::error::Error for BoundsError {}
