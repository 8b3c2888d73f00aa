// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_view2d::BoundsError;
use thiserror::Error;

/// Errors raised while building or driving a [`Canvas`](crate::Canvas).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanvasError {
    /// A configuration value is out of range.
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(String),
    /// The camera produced a query window that cannot be fetched.
    #[error("viewport window rejected: {0}")]
    Bounds(#[from] BoundsError),
}

/// A failed entity fetch, reported back into the reducer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchFailure {
    /// Human-readable cause.
    pub message: String,
    /// Whether trying again later could succeed.
    pub retryable: bool,
}

impl FetchFailure {
    /// A failure worth retrying on the next cycle.
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }
}

/// A failed position commit, reported back into the reducer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CommitFailure {
    /// Human-readable cause.
    pub message: String,
    /// Whether the commit may be retried with backoff.
    pub retryable: bool,
}

impl CommitFailure {
    /// A failure worth retrying (timeouts, 5xx, connection errors).
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    /// A failure that will not go away by retrying (unknown entity, 4xx).
    pub fn terminal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}
