// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corkboard Client: runs a [`Canvas`](corkboard_canvas::Canvas) against a
//! content service.
//!
//! The canvas itself performs no I/O. This crate supplies the pieces around
//! it:
//!
//! - [`ContentService`], the seam to the remote store, with an HTTP
//!   implementation ([`HttpContentService`]) and an in-process one
//!   ([`MemoryContentService`]) for tests and demos.
//! - [`Driver`], a tokio loop that feeds host input and service completions
//!   into the canvas, sleeps until its next timer deadline and executes the
//!   effects it returns, each call bounded by a timeout.
//! - [`CanvasHost`], the callbacks through which a UI learns about
//!   selections, confirmed moves, reverts and live-feed growth.
//! - [`ClientConfig`], the JSON configuration read by the `corkboard` binary.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use corkboard_canvas::Canvas;
//! use corkboard_client::{ClientConfig, Driver, HttpContentService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load("corkboard.json")?;
//! let service = HttpContentService::new(config.base_url.clone(), config.session());
//! let canvas = Canvas::new(config.canvas.clone(), config.screen_size())?;
//! let mut driver = Driver::new(canvas, Arc::new(service), (), config.request_timeout());
//! driver.run().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod driver;
mod error;
mod host;
mod http;
mod memory;
mod service;

pub use config::{ClientConfig, ScreenConfig};
pub use driver::Driver;
pub use error::{ConfigError, ServiceError};
pub use host::{CanvasHost, ascii_minimap};
pub use http::HttpContentService;
pub use memory::{MAX_RESULTS, MemoryContentService};
pub use service::{BoxFuture, ContentService, Session};
