// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corkboard Gesture: turn raw pointer input into camera actions.
//!
//! [`GestureHandler`] is a three-state machine (`Idle`, `Panning`,
//! `Pinching`) over pointer and wheel input:
//!
//! - One contact down on the empty board pans by the raw screen delta
//!   between successive move samples.
//! - Two or more contacts pinch: each frame zooms by the change in distance
//!   between the first two contacts times a sensitivity.
//! - Wheel input zooms without changing state. Scrolling up zooms in.
//! - Fewer than two remaining contacts after a release ends the gesture.
//!
//! Actions are plain [`CameraAction`] values. Anything implementing
//! [`CameraTarget`] can consume them; with the default `view2d_adapter`
//! feature, `corkboard_view2d::Camera` does.
//!
//! Routing is the caller's job: presses that land on an entity belong to the
//! reposition protocol and should not be fed here.
//!
//! ```rust
//! # #[cfg(feature = "view2d_adapter")]
//! # {
//! use kurbo::{Point, Size, Vec2};
//! use corkboard_gesture::{GestureHandler, PointerId, PointerInput, PointerKind};
//! use corkboard_view2d::Camera;
//!
//! let mut camera = Camera::new(Size::new(800.0, 600.0));
//! let mut gestures = GestureHandler::default();
//! let id = PointerId(1);
//!
//! gestures.encode(&PointerInput::down(id, PointerKind::Mouse, Point::new(10.0, 10.0)), &mut camera);
//! gestures.encode(&PointerInput::moved(id, Point::new(30.0, 15.0)), &mut camera);
//! assert_eq!(camera.pan(), Vec2::new(20.0, 5.0));
//! # }
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod handler;
mod input;
mod target;

pub use handler::{
    DEFAULT_PINCH_SENSITIVITY, DEFAULT_WHEEL_SENSITIVITY, GestureConfig, GestureHandler,
    GesturePhase,
};
pub use input::{PointerId, PointerInput, PointerKind, ScrollDelta};
pub use target::{CameraAction, CameraTarget, DEFAULT_LINE_SIZE};
