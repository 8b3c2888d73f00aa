// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture sequences applied to a real `Camera`.

#![cfg(feature = "view2d_adapter")]

use corkboard_gesture::{GestureHandler, GesturePhase, PointerId, PointerInput, PointerKind};
use corkboard_view2d::{Camera, MAX_ZOOM};
use kurbo::{Point, Size, Vec2};

fn touch(id: u64, x: f64) -> PointerInput {
    PointerInput::down(PointerId(id), PointerKind::Touch, Point::new(x, 300.0))
}

#[test]
fn pan_is_raw_screen_delta_at_any_zoom() {
    let mut camera = Camera::new(Size::new(800.0, 600.0));
    camera.set_zoom(2.5);
    let mut gestures = GestureHandler::default();
    let id = PointerId(1);
    gestures.encode(&PointerInput::down(id, PointerKind::Mouse, Point::new(100.0, 100.0)), &mut camera);
    gestures.encode(&PointerInput::moved(id, Point::new(140.0, 90.0)), &mut camera);
    gestures.encode(&PointerInput::moved(id, Point::new(150.0, 95.0)), &mut camera);
    assert_eq!(camera.pan(), Vec2::new(50.0, -5.0));
}

#[test]
fn spreading_pinch_zooms_monotonically_until_ceiling() {
    let mut camera = Camera::new(Size::new(800.0, 600.0));
    let mut gestures = GestureHandler::default();
    gestures.encode(&touch(1, 300.0), &mut camera);
    gestures.encode(&touch(2, 400.0), &mut camera);
    assert_eq!(gestures.phase(), GesturePhase::Pinching);

    let mut last = camera.zoom();
    let mut right = 400.0;
    let mut reached_ceiling = false;
    for _ in 0..100 {
        right += 10.0;
        gestures.encode(&PointerInput::moved(PointerId(2), Point::new(right, 300.0)), &mut camera);
        let zoom = camera.zoom();
        if last < MAX_ZOOM {
            assert!(zoom > last, "zoom must grow while below the ceiling");
        }
        assert!(zoom <= MAX_ZOOM);
        reached_ceiling |= zoom == MAX_ZOOM;
        last = zoom;
    }
    assert!(reached_ceiling);
}

#[test]
fn lifting_to_one_contact_stops_pinching() {
    let mut camera = Camera::new(Size::new(800.0, 600.0));
    let mut gestures = GestureHandler::default();
    gestures.encode(&touch(1, 300.0), &mut camera);
    gestures.encode(&touch(2, 400.0), &mut camera);
    gestures.encode(&PointerInput::up(PointerId(1), Point::new(300.0, 300.0)), &mut camera);
    assert_eq!(gestures.phase(), GesturePhase::Idle);

    let pan = camera.pan();
    let zoom = camera.zoom();
    gestures.encode(&PointerInput::moved(PointerId(2), Point::new(500.0, 300.0)), &mut camera);
    assert_eq!(camera.pan(), pan);
    assert_eq!(camera.zoom(), zoom);
}
