// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::Path;
use std::time::Duration;

use corkboard_canvas::CanvasConfig;
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Session};

/// Host surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Settings for a [`Driver`](crate::Driver) session, usually read from a
/// JSON file.
///
/// ```json
/// {
///   "base_url": "https://board.example",
///   "live": true,
///   "screen": { "width": 1024, "height": 768 },
///   "canvas": { "debounce_ms": 400 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the content service.
    pub base_url: String,
    /// Upper bound on any single service call.
    pub request_timeout_ms: u64,
    /// Session token forwarded as `x-user-token`.
    pub user_token: Option<String>,
    /// Start with the live feed enabled.
    pub live: bool,
    /// Host surface size.
    pub screen: ScreenConfig,
    /// Canvas tunables.
    pub canvas: CanvasConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
            request_timeout_ms: 10_000,
            user_token: None,
            live: false,
            screen: ScreenConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parses a JSON configuration and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.canvas.validate()?;
        Ok(config)
    }

    /// Reads and parses the JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// [`request_timeout_ms`](Self::request_timeout_ms) as a duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Host surface size.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        Size::new(self.screen.width, self.screen.height)
    }

    /// Session to hand to the content service.
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            user_token: self.user_token.clone(),
            is_admin: false,
        }
    }
}
