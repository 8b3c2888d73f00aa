// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use corkboard_canvas::{CommitFailure, EntityId, FetchFailure};
use thiserror::Error;

/// Failure of a call against a [`ContentService`](crate::ContentService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// No answer within the request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The entity to update does not exist.
    #[error("entity {0} not found")]
    NotFound(EntityId),
    /// The service refused to serve the request right now.
    #[error("service unavailable: {0}")]
    Unavailable(String),
    /// No request URL could be built from the configured base URL.
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
}

impl ServiceError {
    /// Returns `true` if the same request may succeed later.
    ///
    /// Transport errors, timeouts, throttling and server errors are
    /// retryable. Client errors and undecodable bodies are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) | Self::Unavailable(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::NotFound(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<ServiceError> for FetchFailure {
    fn from(err: ServiceError) -> Self {
        Self {
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

impl From<ServiceError> for CommitFailure {
    fn from(err: ServiceError) -> Self {
        Self {
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

/// Failure to load a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid configuration.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The embedded canvas configuration was rejected.
    #[error(transparent)]
    Canvas(#[from] corkboard_canvas::CanvasError),
}
