// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corkboard Event State: pointer state machines for board interactions.
//!
//! This crate provides small, focused state machines for interactions that
//! need stateful tracking across several pointer events:
//!
//! - [`drag`]: Track a pointer from press to release, reporting per-sample
//!   deltas and the total displacement.
//! - [`reposition`]: Decide whether a press on an entity was a click or a
//!   move, and produce exactly one committed position for a move.
//!
//! Both accept raw pointer positions and produce plain values; they do not
//! know about cameras, networking or any UI framework. Entity keys are
//! generic so callers can use whatever id type their content service uses.
//!
//! ## Click or move
//!
//! ```rust
//! use kurbo::Point;
//! use corkboard_event_state::reposition::{Release, RepositionState};
//!
//! let mut state = RepositionState::new(5.0);
//!
//! // Press on entity 7, whose committed world position is (40, 40).
//! state.press(7_u32, Point::new(100.0, 100.0), Point::new(40.0, 40.0));
//!
//! // Small wobble: still a press, no visual change.
//! assert_eq!(state.update(Point::new(102.0, 101.0), 1.0), None);
//!
//! // Release 111.8 px away: a move, committed once.
//! let release = state.release(Point::new(200.0, 150.0), 1.0);
//! assert_eq!(
//!     release,
//!     Some(Release::Commit { key: 7, position: Point::new(140.0, 90.0) })
//! );
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod reposition;
