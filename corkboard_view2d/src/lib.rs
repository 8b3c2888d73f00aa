// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corkboard View 2D: camera and viewport primitives for an infinite board.
//!
//! This crate provides a small, headless model of the board's pan + zoom
//! camera. It focuses on:
//! - Camera state (uniform zoom clamped to a range, unbounded pan).
//! - Exact coordinate conversion between world and screen (pixel) space.
//! - The buffered world-space [`ViewportWindow`] used to query entities near
//!   the visible area.
//! - The [`MinimapProjection`] that fits every known entity plus the visible
//!   rectangle into a small overview surface.
//!
//! It does **not** own entities, fetch anything, or interpret input. Callers
//! are expected to:
//! - Feed pan/zoom deltas from a gesture layer (see `corkboard_gesture`).
//! - Debounce and issue windowed fetches at a higher layer (see
//!   `corkboard_canvas`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use corkboard_view2d::{Camera, ViewportWindow};
//!
//! let mut camera = Camera::new(Size::new(800.0, 600.0));
//! camera.pan_by(Vec2::new(40.0, -20.0));
//! camera.zoom_by(0.5);
//!
//! // Screen-space hit point to world space.
//! let world = camera.screen_to_world_point(Point::new(400.0, 300.0));
//! let back = camera.world_to_screen_point(world);
//! assert!((back.x - 400.0).abs() < 1e-9);
//!
//! // Buffered query window: the visible rect grown by 3x the screen extent.
//! let window = ViewportWindow::around(&camera, 3.0).unwrap();
//! assert!(window.contains_rect(camera.visible_world_rect()));
//! ```
//!
//! ## Design notes
//!
//! - The transform is `screen = world * zoom + pan` with a uniform zoom.
//! - Zoom changes are additive and clamped (`0.1 ..= 3.0` by default); they
//!   are never an error.
//! - The world is unbounded, so there is no pan clamping.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod camera;
mod minimap;
mod window;

pub use camera::{Camera, CameraDebugInfo, MAX_ZOOM, MIN_ZOOM};
pub use minimap::{Minimap, MinimapProjection, DEFAULT_MINIMAP_PADDING, DEFAULT_MINIMAP_SIZE};
pub use window::{BoundsError, DEFAULT_BUFFER_FACTOR, ViewportWindow};
