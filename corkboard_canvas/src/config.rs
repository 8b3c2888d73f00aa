// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_event_state::reposition::DragTracking;
use corkboard_gesture::GestureConfig;
use corkboard_timing::Backoff;
use serde::{Deserialize, Serialize};

use crate::CanvasError;

/// Tunables for a [`Canvas`](crate::Canvas).
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Query window margin, in screen extents per axis.
    pub buffer_factor: f64,
    /// Camera quiescence before a windowed fetch is issued.
    pub debounce_ms: u64,
    /// Live feed polling period.
    pub live_interval_ms: u64,
    /// Screen distance separating a click from a move.
    pub drag_threshold_px: f64,
    /// Zoom change per pixel of wheel scroll.
    pub wheel_sensitivity: f64,
    /// Zoom change per pixel of pinch distance change.
    pub pinch_sensitivity: f64,
    /// How drag displacement maps into world space.
    pub drag_tracking: DragTrackingMode,
    /// Retry policy for position commits.
    pub commit_retry: RetryConfig,
    /// World-space padding around entities in the minimap.
    pub minimap_padding: f64,
    /// Render entities flagged NSFW.
    pub show_nsfw: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: corkboard_view2d::MIN_ZOOM,
            max_zoom: corkboard_view2d::MAX_ZOOM,
            buffer_factor: corkboard_view2d::DEFAULT_BUFFER_FACTOR,
            debounce_ms: 600,
            live_interval_ms: 5_000,
            drag_threshold_px: corkboard_event_state::reposition::DEFAULT_DRAG_THRESHOLD,
            wheel_sensitivity: corkboard_gesture::DEFAULT_WHEEL_SENSITIVITY,
            pinch_sensitivity: corkboard_gesture::DEFAULT_PINCH_SENSITIVITY,
            drag_tracking: DragTrackingMode::Screen,
            commit_retry: RetryConfig::default(),
            minimap_padding: corkboard_view2d::DEFAULT_MINIMAP_PADDING,
            show_nsfw: false,
        }
    }
}

impl CanvasConfig {
    /// Checks ranges that would otherwise produce a degenerate camera.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CanvasError::InvalidConfig(format!(
                    "{name} must be a positive finite number, got {v}"
                )))
            }
        };
        positive("min_zoom", self.min_zoom)?;
        positive("max_zoom", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(CanvasError::InvalidConfig(format!(
                "min_zoom ({}) exceeds max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        positive("buffer_factor", self.buffer_factor)?;
        positive("wheel_sensitivity", self.wheel_sensitivity)?;
        positive("pinch_sensitivity", self.pinch_sensitivity)?;
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0) {
            return Err(CanvasError::InvalidConfig(
                "drag_threshold_px must be finite and non-negative".into(),
            ));
        }
        if !(self.minimap_padding.is_finite() && self.minimap_padding >= 0.0) {
            return Err(CanvasError::InvalidConfig(
                "minimap_padding must be finite and non-negative".into(),
            ));
        }
        if self.live_interval_ms == 0 {
            return Err(CanvasError::InvalidConfig(
                "live_interval_ms must be non-zero".into(),
            ));
        }
        if self.commit_retry.max_attempts == 0 {
            return Err(CanvasError::InvalidConfig(
                "commit_retry.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Gesture tuning derived from this configuration.
    #[must_use]
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            wheel_sensitivity: self.wheel_sensitivity,
            pinch_sensitivity: self.pinch_sensitivity,
        }
    }

    /// Commit retry policy derived from this configuration.
    #[must_use]
    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            self.commit_retry.max_attempts,
            self.commit_retry.initial_backoff_ms,
            self.commit_retry.max_backoff_ms,
        )
    }
}

/// Serializable form of [`DragTracking`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragTrackingMode {
    /// Screen pixels map 1:1 onto world units.
    #[default]
    Screen,
    /// Screen pixels are divided by the zoom.
    World,
}

impl From<DragTrackingMode> for DragTracking {
    fn from(mode: DragTrackingMode) -> Self {
        match mode {
            DragTrackingMode::Screen => Self::Screen,
            DragTrackingMode::World => Self::World,
        }
    }
}

/// Commit retry settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_backoff_ms: u64,
    /// Cap on any single retry delay.
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let backoff = Backoff::default();
        Self {
            max_attempts: backoff.max_attempts,
            initial_backoff_ms: backoff.initial_ms,
            max_backoff_ms: backoff.max_ms,
        }
    }
}
