// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::future::Future;
use std::pin::Pin;

use corkboard_canvas::{Entity, EntityId, ViewportWindow};
use kurbo::Point;

use crate::ServiceError;

/// Boxed future returned by [`ContentService`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Identity forwarded to the content service.
///
/// Moves are not authorized by the canvas; the token is only passed along
/// so the service can attribute or reject them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Opaque user token, sent as `x-user-token`.
    pub user_token: Option<String>,
    /// Whether the user is an administrator.
    pub is_admin: bool,
}

impl Session {
    /// A session carrying `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            user_token: Some(token.into()),
            is_admin: false,
        }
    }
}

/// The remote store of board entities.
pub trait ContentService: Send + Sync {
    /// Entities whose position lies inside `window` (bounds inclusive).
    fn list_window(&self, window: ViewportWindow) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>>;

    /// The most recent entities, newest first, without spatial bounds.
    fn list_recent(&self) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>>;

    /// Moves entity `id` to `position` and returns the stored entity.
    fn update_position(
        &self,
        id: EntityId,
        position: Point,
    ) -> BoxFuture<'_, Result<Entity, ServiceError>>;
}
