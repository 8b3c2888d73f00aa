// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-style checks for `Camera` and `ViewportWindow` over a spread of
//! camera states.

use corkboard_view2d::{Camera, DEFAULT_BUFFER_FACTOR, MAX_ZOOM, MIN_ZOOM, ViewportWindow};
use kurbo::{Point, Size, Vec2};

const EPS: f64 = 1e-6;

/// Small deterministic generator so the checks cover many states without a
/// property-testing dependency.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.0 >> 11) as f64 / (1_u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

fn cameras() -> Vec<Camera> {
    let mut rng = Lcg(0x5eed);
    (0..200)
        .map(|_| {
            let mut camera = Camera::new(Size::new(
                rng.next_f64(320.0, 2560.0),
                rng.next_f64(240.0, 1440.0),
            ));
            camera.set_zoom(rng.next_f64(MIN_ZOOM, MAX_ZOOM));
            camera.set_pan(Vec2::new(
                rng.next_f64(-50_000.0, 50_000.0),
                rng.next_f64(-50_000.0, 50_000.0),
            ));
            camera
        })
        .collect()
}

#[test]
fn zoom_by_any_delta_stays_in_range() {
    let mut camera = Camera::default();
    let mut rng = Lcg(7);
    for _ in 0..1_000 {
        camera.zoom_by(rng.next_f64(-5.0, 5.0));
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&camera.zoom()));
    }
}

#[test]
fn world_screen_round_trip_is_identity() {
    let mut rng = Lcg(11);
    for camera in cameras() {
        let world = Point::new(rng.next_f64(-1e5, 1e5), rng.next_f64(-1e5, 1e5));
        let back = camera.screen_to_world_point(camera.world_to_screen_point(world));
        assert!((back.x - world.x).abs() < EPS);
        assert!((back.y - world.y).abs() < EPS);
    }
}

#[test]
fn center_on_maps_target_to_screen_center() {
    let mut rng = Lcg(13);
    for mut camera in cameras() {
        let target = Point::new(rng.next_f64(-1e4, 1e4), rng.next_f64(-1e4, 1e4));
        camera.center_on(target);
        let screen = camera.world_to_screen_point(target);
        let size = camera.screen_size();
        assert!((screen.x - size.width / 2.0).abs() < EPS);
        assert!((screen.y - size.height / 2.0).abs() < EPS);
    }
}

#[test]
fn window_contains_visible_rect_plus_buffer() {
    for camera in cameras() {
        let visible = camera.visible_world_rect();
        let window = ViewportWindow::around(&camera, DEFAULT_BUFFER_FACTOR).unwrap();
        let screen = camera.screen_size();
        assert!(window.contains_rect(visible));
        assert!(visible.min_x() - window.min_x >= DEFAULT_BUFFER_FACTOR * screen.width - EPS);
        assert!(window.max_x - visible.max_x() >= DEFAULT_BUFFER_FACTOR * screen.width - EPS);
        assert!(visible.min_y() - window.min_y >= DEFAULT_BUFFER_FACTOR * screen.height - EPS);
        assert!(window.max_y - visible.max_y() >= DEFAULT_BUFFER_FACTOR * screen.height - EPS);
    }
}
