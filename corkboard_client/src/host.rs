// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_canvas::{Canvas, EntityId, Minimap};
use kurbo::Point;

/// Receives the user-visible outcomes of a [`Driver`](crate::Driver)
/// session.
///
/// Every method has an empty default so hosts only implement what they
/// render.
pub trait CanvasHost: Send {
    /// The user clicked an entity.
    fn on_select(&mut self, _id: &EntityId) {}

    /// The service confirmed a moved entity's position.
    fn on_position_committed(&mut self, _id: &EntityId, _position: Point) {}

    /// The live feed found more entities than on its previous poll.
    fn on_new_entities(&mut self, _previous: usize, _current: usize) {}

    /// A move failed for good and the entity was put back.
    fn on_reverted(&mut self, _id: &EntityId, _position: Point) {}

    /// A fetch result replaced the entity set.
    fn on_refresh(&mut self, _canvas: &Canvas) {}
}

impl CanvasHost for () {}

/// Renders a minimap as text, one character per minimap pixel.
///
/// `*` marks entities, `#` the visible viewport outline and `.` empty space.
/// Parts of the outline outside the map are not drawn.
#[must_use]
pub fn ascii_minimap(minimap: &Minimap) -> String {
    let size = minimap.projection.size();
    let cols = cell_count(size.width);
    let rows = cell_count(size.height);
    let mut grid = vec![vec!['.'; cols]; rows];

    let vp = minimap.viewport;
    if let (Some((c0, c1)), Some((r0, r1))) = (span(vp.x0, vp.x1, cols), span(vp.y0, vp.y1, rows)) {
        for c in c0..=c1 {
            if let Some(r) = cell(vp.y0, rows) {
                grid[r][c] = '#';
            }
            if let Some(r) = cell(vp.y1, rows) {
                grid[r][c] = '#';
            }
        }
        for row in &mut grid[r0..=r1] {
            if let Some(c) = cell(vp.x0, cols) {
                row[c] = '#';
            }
            if let Some(c) = cell(vp.x1, cols) {
                row[c] = '#';
            }
        }
    }

    for dot in &minimap.dots {
        if let (Some(c), Some(r)) = (cell(dot.x, cols), cell(dot.y, rows)) {
            grid[r][c] = '*';
        }
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "minimap extents are clamped to a small positive range before casting"
)]
fn cell_count(extent: f64) -> usize {
    extent.round().clamp(1.0, 512.0) as usize
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "checked against the non-negative grid extent before use"
)]
fn cell(v: f64, n: usize) -> Option<usize> {
    if !(v >= 0.0) {
        return None;
    }
    let i = v.floor() as usize;
    (i < n).then_some(i)
}

// Cells covered by [a, b] after clipping to the grid.
fn span(a: f64, b: f64, n: usize) -> Option<(usize, usize)> {
    let max = (n - 1) as f64;
    let (lo, hi) = (a.min(b), a.max(b));
    if !(hi >= 0.0 && lo <= max + 1.0) {
        return None;
    }
    Some((cell(lo.clamp(0.0, max), n)?, cell(hi.clamp(0.0, max), n)?))
}

#[cfg(test)]
mod tests {
    use corkboard_canvas::{Camera, Minimap};
    use kurbo::{Point, Size};

    use super::ascii_minimap;

    #[test]
    fn draws_dots_and_viewport() {
        let camera = Camera::new(Size::new(800.0, 600.0));
        let minimap = Minimap::project(
            [Point::new(-3000.0, -3000.0), Point::new(3000.0, 3000.0)],
            &camera,
            Size::new(20.0, 10.0),
            500.0,
        )
        .unwrap();
        let text = ascii_minimap(&minimap);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 20));
        assert_eq!(text.matches('*').count(), 2);
        assert!(text.contains('#'));
    }
}
