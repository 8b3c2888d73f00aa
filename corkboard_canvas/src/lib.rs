// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corkboard Canvas: the board's interaction core as a single reducer.
//!
//! [`Canvas`] ties the smaller kernels together:
//!
//! - the camera and buffered query window from `corkboard_view2d`,
//! - pan / wheel / pinch recognition from `corkboard_gesture`,
//! - the click-or-move reposition protocol from `corkboard_event_state`,
//! - debounce, polling and retry timers from `corkboard_timing`.
//!
//! It is driven as `(state, event) -> effects`. Effects are the only place
//! where I/O happens, and the host reports their outcome back as events:
//!
//! ```rust
//! use corkboard_canvas::{Canvas, CanvasConfig, Effect, Entity, Event};
//! use kurbo::Size;
//!
//! let mut canvas = Canvas::new(CanvasConfig::default(), Size::new(800.0, 600.0)).unwrap();
//!
//! // Starting issues the first windowed fetch straight away.
//! let effects = canvas.handle(0, Event::Start);
//! let Some(Effect::FetchWindow { generation, .. }) = effects.first().cloned() else {
//!     unreachable!()
//! };
//!
//! // The host runs the query and feeds the result back.
//! canvas.handle(
//!     120,
//!     Event::WindowFetched {
//!         generation,
//!         result: Ok(vec![Entity::new("a", 10.0, 20.0)]),
//!     },
//! );
//! assert_eq!(canvas.entities().count(), 1);
//! ```
//!
//! ## Ordering
//!
//! - Windowed and live fetches are tagged with a per-path [`Generation`]; a
//!   response is applied only if it carries the latest generation issued on
//!   its path. The two paths do not coordinate; whichever applies last wins.
//! - Position commits go through an outbox with one entry per entity. A
//!   retryable failure is retried with capped exponential backoff; a
//!   terminal failure reverts the entity to its last confirmed position.
//! - Camera changes are debounced before they trigger a windowed fetch.

mod canvas;
mod config;
mod entity;
mod error;
mod event;
mod outbox;

pub use canvas::Canvas;
pub use config::{CanvasConfig, DragTrackingMode, RetryConfig};
pub use entity::{Entity, EntityId, EntitySet, EntityView, RenderState};
pub use error::{CanvasError, CommitFailure, FetchFailure};
pub use event::{CommitTicket, Effect, Event, Generation, HitTarget};

pub use corkboard_event_state::reposition::RepositionPhase;
pub use corkboard_gesture::{GesturePhase, PointerId, PointerInput, PointerKind, ScrollDelta};
pub use corkboard_view2d::{Camera, Minimap, ViewportWindow};
