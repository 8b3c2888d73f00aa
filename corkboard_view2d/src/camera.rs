// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Default lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;

/// Default upper zoom bound.
pub const MAX_ZOOM: f64 = 3.0;

/// Pan + zoom camera over the board's world plane.
///
/// `Camera` tracks the screen size in pixels and a uniform zoom + pan mapping
/// world coordinates onto the screen:
///
/// - world → screen: `screen = world * zoom + pan`
/// - screen → world: `world = (screen - pan) / zoom`
///
/// Mutators report whether they changed the camera so that callers can
/// re-arm dependent work (for example a debounced windowed fetch) only when
/// something actually moved.
#[derive(Clone, Debug)]
pub struct Camera {
    screen: Size,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    world_to_screen: Affine,
    screen_to_world: Affine,
}

impl Camera {
    /// Creates a camera for a screen of the given size.
    ///
    /// - Initial zoom is `1.0`.
    /// - Initial pan is zero (world origin maps to the screen origin).
    /// - Zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    #[must_use]
    pub fn new(screen: Size) -> Self {
        let mut camera = Self {
            screen,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            world_to_screen: Affine::IDENTITY,
            screen_to_world: Affine::IDENTITY,
        };
        camera.rebuild_transforms();
        camera
    }

    /// Returns the screen size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Sets the screen size in pixels.
    ///
    /// Zoom and pan are unchanged, but the visible world region and the
    /// centering target of [`Camera::center_on`] follow the new size.
    pub fn set_screen_size(&mut self, screen: Size) -> bool {
        if self.screen == screen || !screen.is_finite() {
            return false;
        }
        self.screen = screen;
        true
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current pan offset in screen pixels.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the configured `(min, max)` zoom range.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        if !(min_zoom.is_finite() && max_zoom.is_finite()) || min_zoom <= 0.0 || max_zoom <= 0.0 {
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the zoom factor, clamping it into the configured range.
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return false;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
        true
    }

    /// Adds `delta` to the zoom factor, clamping the result.
    ///
    /// Out-of-range results are silently clamped; this never fails.
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        self.set_zoom(self.zoom + delta)
    }

    /// Pans by a delta in screen pixels. The world is unbounded.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return false;
        }
        self.pan += delta;
        self.rebuild_transforms();
        true
    }

    /// Sets the pan offset in screen pixels.
    pub fn set_pan(&mut self, pan: Vec2) -> bool {
        if self.pan == pan || !pan.is_finite() {
            return false;
        }
        self.pan = pan;
        self.rebuild_transforms();
        true
    }

    /// Pans so that `world_pt` maps to the exact center of the screen.
    ///
    /// `pan = (width / 2 - x * zoom, height / 2 - y * zoom)`
    pub fn center_on(&mut self, world_pt: Point) -> bool {
        if !world_pt.is_finite() {
            return false;
        }
        let pan = Vec2::new(
            self.screen.width / 2.0 - world_pt.x * self.zoom,
            self.screen.height / 2.0 - world_pt.y * self.zoom,
        );
        self.set_pan(pan)
    }

    /// Restores zoom `1.0` and zero pan.
    pub fn reset(&mut self) -> bool {
        if self.zoom == 1.0 && self.pan == Vec2::ZERO {
            return false;
        }
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.pan = Vec2::ZERO;
        self.rebuild_transforms();
        true
    }

    /// Returns the world point shown at the center of the screen.
    #[must_use]
    pub fn center_world(&self) -> Point {
        self.screen_to_world_point(self.screen.to_rect().center())
    }

    /// Returns the world-space rectangle currently visible on screen.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.screen_to_world_rect(self.screen.to_rect())
    }

    /// Converts a world-space point into screen coordinates.
    #[must_use]
    pub fn world_to_screen_point(&self, pt: Point) -> Point {
        self.world_to_screen * pt
    }

    /// Converts a screen-space point into world coordinates.
    #[must_use]
    pub fn screen_to_world_point(&self, pt: Point) -> Point {
        self.screen_to_world * pt
    }

    /// Converts a world-space rectangle into screen coordinates.
    #[must_use]
    pub fn world_to_screen_rect(&self, rect: Rect) -> Rect {
        // Zoom is uniform and positive, so mapping the two corners is enough.
        let p0 = self.world_to_screen * Point::new(rect.x0, rect.y0);
        let p1 = self.world_to_screen * Point::new(rect.x1, rect.y1);
        Rect::from_points(p0, p1)
    }

    /// Converts a screen-space rectangle into world coordinates.
    #[must_use]
    pub fn screen_to_world_rect(&self, rect: Rect) -> Rect {
        let p0 = self.screen_to_world * Point::new(rect.x0, rect.y0);
        let p1 = self.screen_to_world * Point::new(rect.x1, rect.y1);
        Rect::from_points(p0, p1)
    }

    /// Returns the current world-units-per-pixel ratio, `1 / zoom`.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Returns `true` when zoom and pan are finite and zoom is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0 && self.pan.is_finite() && self.screen.is_finite()
    }

    /// Snapshot of the current camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CameraDebugInfo {
        CameraDebugInfo {
            screen: self.screen,
            visible_world_rect: self.visible_world_rect(),
            zoom: self.zoom,
            pan: self.pan,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    fn rebuild_transforms(&mut self) {
        // World → screen: scale, then translate by pan.
        self.world_to_screen = Affine::translate(self.pan) * Affine::scale(self.zoom);
        self.screen_to_world = self.world_to_screen.inverse();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Size::new(1920.0, 1080.0))
    }
}

/// Debug snapshot of a [`Camera`] state.
#[derive(Clone, Copy, Debug)]
pub struct CameraDebugInfo {
    /// Screen size in pixels.
    pub screen: Size,
    /// World-space rectangle currently visible on screen.
    pub visible_world_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in screen pixels.
    pub pan: Vec2,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{Camera, MAX_ZOOM, MIN_ZOOM};

    const EPS: f64 = 1e-9;

    #[test]
    fn starts_at_unit_zoom_and_zero_pan() {
        let camera = Camera::new(Size::new(800.0, 600.0));
        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.pan(), Vec2::ZERO);
        assert_eq!(camera.zoom_limits(), (MIN_ZOOM, MAX_ZOOM));
    }

    #[test]
    fn zoom_by_clamps_to_limits() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        assert!(camera.zoom_by(10.0));
        assert_eq!(camera.zoom(), MAX_ZOOM);
        assert!(!camera.zoom_by(1.0), "already at the ceiling");

        assert!(camera.zoom_by(-100.0));
        assert_eq!(camera.zoom(), MIN_ZOOM);
    }

    #[test]
    fn zoom_ignores_non_finite_deltas() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        assert!(!camera.zoom_by(f64::NAN));
        assert!(!camera.zoom_by(f64::INFINITY));
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn pan_accumulates_screen_deltas() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        camera.pan_by(Vec2::new(10.0, 5.0));
        camera.pan_by(Vec2::new(-3.0, 2.0));
        assert_eq!(camera.pan(), Vec2::new(7.0, 7.0));
        assert!(!camera.pan_by(Vec2::ZERO));
        assert!(!camera.pan_by(Vec2::new(f64::NAN, 0.0)));
    }

    #[test]
    fn center_on_uses_current_zoom() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        camera.set_zoom(2.0);
        camera.center_on(Point::new(100.0, 50.0));
        assert_eq!(camera.pan(), Vec2::new(400.0 - 200.0, 300.0 - 100.0));

        let center = camera.world_to_screen_point(Point::new(100.0, 50.0));
        assert!((center.x - 400.0).abs() < EPS);
        assert!((center.y - 300.0).abs() < EPS);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        camera.zoom_by(0.7);
        camera.pan_by(Vec2::new(12.0, 13.0));
        assert!(camera.reset());
        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.pan(), Vec2::ZERO);
        assert!(!camera.reset());
    }

    #[test]
    fn visible_rect_tracks_pan_and_zoom() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        camera.set_pan(Vec2::new(-200.0, -100.0));
        camera.set_zoom(2.0);
        let visible = camera.visible_world_rect();
        assert!((visible.x0 - 100.0).abs() < EPS);
        assert!((visible.y0 - 50.0).abs() < EPS);
        assert!((visible.width() - 400.0).abs() < EPS);
        assert!((visible.height() - 300.0).abs() < EPS);
    }

    #[test]
    fn zoom_limits_are_normalized() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        camera.set_zoom(2.5);
        camera.set_zoom_limits(2.0, 0.5);
        assert_eq!(camera.zoom_limits(), (0.5, 2.0));
        assert_eq!(camera.zoom(), 2.0);

        let info = camera.debug_info();
        assert!(info.min_zoom <= info.max_zoom);
    }

    #[test]
    fn resizing_changes_center_target() {
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        assert!(camera.set_screen_size(Size::new(1000.0, 500.0)));
        assert!(!camera.set_screen_size(Size::new(1000.0, 500.0)));
        camera.center_on(Point::ZERO);
        assert_eq!(camera.pan(), Vec2::new(500.0, 250.0));
    }
}
