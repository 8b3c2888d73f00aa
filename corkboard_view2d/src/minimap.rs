// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::Camera;

/// Default minimap surface size in pixels.
pub const DEFAULT_MINIMAP_SIZE: Size = Size::new(150.0, 150.0);

/// Default world-space padding added around the entity bounding box.
pub const DEFAULT_MINIMAP_PADDING: f64 = 2000.0;

/// Uniform, aspect-preserving projection from world space into a minimap.
///
/// The projection fits the padded bounding box of a point set into the
/// minimap surface and centers it along the slack axis:
///
/// `mini = (world - box_min) * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapProjection {
    world_bounds: Rect,
    scale: f64,
    offset: Vec2,
    size: Size,
}

impl MinimapProjection {
    /// Fits the padded bounding box of `points` into a `size` minimap.
    ///
    /// Non-finite points are skipped. Returns `None` when there is nothing to
    /// project or the minimap surface is empty.
    pub fn fit<I>(points: I, size: Size, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        if !(size.width > 0.0 && size.height > 0.0) {
            return None;
        }
        let mut bounds: Option<Rect> = None;
        for pt in points.into_iter().filter(|p| p.is_finite()) {
            bounds = Some(match bounds {
                Some(r) => r.union_pt(pt),
                None => Rect::from_points(pt, pt),
            });
        }
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let world_bounds = bounds?.inflate(padding, padding);

        // A single point with no padding collapses the box; fall back to a
        // unit range so the scale stays finite.
        let range_x = nonzero_range(world_bounds.width());
        let range_y = nonzero_range(world_bounds.height());
        let scale = (size.width / range_x).min(size.height / range_y);
        let offset = Vec2::new(
            (size.width - range_x * scale) / 2.0,
            (size.height - range_y * scale) / 2.0,
        );
        Some(Self {
            world_bounds,
            scale,
            offset,
            size,
        })
    }

    /// Projects a world-space point into minimap pixels.
    #[must_use]
    pub fn project(&self, world: Point) -> Point {
        let local = (world - self.world_bounds.origin()) * self.scale;
        (local + self.offset).to_point()
    }

    /// Projects a world-space rectangle into minimap pixels.
    #[must_use]
    pub fn project_rect(&self, world: Rect) -> Rect {
        Rect::from_points(
            self.project(Point::new(world.x0, world.y0)),
            self.project(Point::new(world.x1, world.y1)),
        )
    }

    /// Projects the camera's on-screen world rectangle into minimap pixels.
    #[must_use]
    pub fn viewport_rect(&self, camera: &Camera) -> Rect {
        self.project_rect(camera.visible_world_rect())
    }

    /// Padded world-space bounding box covered by the projection.
    #[must_use]
    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    /// Uniform world → minimap scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Centering offset in minimap pixels.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Minimap surface size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

/// One full minimap frame: projected entity dots plus the viewport outline.
///
/// Frames are recomputed from scratch whenever entities or the camera change.
#[derive(Clone, Debug, PartialEq)]
pub struct Minimap {
    /// Projection used for this frame.
    pub projection: MinimapProjection,
    /// Projected entity positions, in input order.
    pub dots: Vec<Point>,
    /// Projected on-screen viewport rectangle.
    pub viewport: Rect,
}

impl Minimap {
    /// Projects `points` and the camera's visible rectangle into a minimap of
    /// the given size.
    ///
    /// Returns `None` for an empty point set; there is nothing to draw.
    pub fn project<I>(points: I, camera: &Camera, size: Size, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let projection = MinimapProjection::fit(points.clone(), size, padding)?;
        let dots = points
            .filter(|p| p.is_finite())
            .map(|p| projection.project(p))
            .collect();
        Some(Self {
            projection,
            dots,
            viewport: projection.viewport_rect(camera),
        })
    }
}

fn nonzero_range(range: f64) -> f64 {
    if range > 0.0 { range } else { 1.0 }
}
