// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Default height of one scroll line in screen pixels.
pub const DEFAULT_LINE_SIZE: f64 = 20.0;

/// A camera change produced by a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraAction {
    /// Pan by a screen-space delta.
    PanBy(Vec2),
    /// Add to the zoom factor; the target clamps.
    ZoomBy(f64),
}

/// Something that can apply camera actions.
///
/// The target also supplies the sizes used to turn line and page scroll
/// deltas into pixels.
pub trait CameraTarget {
    /// Applies an action. Returns `true` if the target changed.
    fn apply(&mut self, action: CameraAction) -> bool;

    /// Size of one scroll line in screen pixels.
    fn line_size(&self) -> Vec2 {
        Vec2::new(DEFAULT_LINE_SIZE, DEFAULT_LINE_SIZE)
    }

    /// Size of one scroll page in screen pixels.
    fn page_size(&self) -> Vec2;
}

#[cfg(feature = "view2d_adapter")]
impl CameraTarget for corkboard_view2d::Camera {
    fn apply(&mut self, action: CameraAction) -> bool {
        match action {
            CameraAction::PanBy(delta) => self.pan_by(delta),
            CameraAction::ZoomBy(delta) => self.zoom_by(delta),
        }
    }

    fn page_size(&self) -> Vec2 {
        self.screen_size().to_vec2()
    }
}
