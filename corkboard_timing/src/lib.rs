// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corkboard Timing: host-agnostic timer primitives.
//!
//! Nothing here reads a clock. Time is a caller-supplied monotonic
//! timestamp in milliseconds, so the same state machine can be driven by an
//! async runtime, a frame loop or a test that simply counts.
//!
//! - [`TimerQueue`]: keyed one-shot deadlines. Scheduling an existing key
//!   moves its deadline, which is exactly what a debounce needs.
//! - [`Backoff`]: capped exponential retry delays with an attempt budget.
//!
//! ```rust
//! use corkboard_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule("fetch", 600);
//! // Another camera change at t=400 pushes the debounce out.
//! timers.schedule("fetch", 400 + 600);
//! assert_eq!(timers.pop_due(600), None);
//! assert_eq!(timers.pop_due(1000), Some("fetch"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backoff;
mod queue;

pub use backoff::Backoff;
pub use queue::TimerQueue;
