// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use hashbrown::HashMap;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Opaque entity identifier assigned by the content service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A post pinned to the board, as served by the content service.
///
/// Only `x` and `y` are ever written back; the summary fields are carried
/// through for the host to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Stable id.
    pub id: EntityId,
    /// Short share id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    /// World x.
    pub x: f64,
    /// World y.
    pub y: f64,
    /// Body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp as sent by the service (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Number of replies.
    #[serde(default)]
    pub reply_count: u32,
    /// Number of likes.
    #[serde(default)]
    pub likes: u32,
    /// Flagged as not safe for work.
    #[serde(default, rename = "isNSFW")]
    pub is_nsfw: bool,
}

impl Entity {
    /// Creates an entity with only an id and a position.
    pub fn new(id: impl Into<EntityId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            short_id: None,
            x,
            y,
            text: None,
            image_url: None,
            created_at: None,
            reply_count: 0,
            likes: 0,
            is_nsfw: false,
        }
    }

    /// World position.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Why an entity renders where it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// At the position last confirmed by the service.
    Confirmed,
    /// Following the pointer in an active drag.
    Dragging,
    /// At an optimistic position whose commit has not been confirmed.
    Pending,
}

/// Borrowed view of an entity with its render position.
#[derive(Clone, Copy, Debug)]
pub struct EntityView<'a> {
    /// Entity as last received from the service.
    pub entity: &'a Entity,
    /// Where to draw it.
    pub position: Point,
    /// Which overlay produced `position`.
    pub state: RenderState,
}

#[derive(Clone, Debug, Default)]
struct Overlay {
    dragging: Option<Point>,
    pending: Option<Point>,
}

impl Overlay {
    fn is_empty(&self) -> bool {
        self.dragging.is_none() && self.pending.is_none()
    }
}

/// The in-memory entity set with drag and optimistic-commit overlays.
///
/// Fetch results replace the set wholesale (last write wins) while overlays
/// survive by id, so an in-flight drag or commit is not snapped back by a
/// refresh that still carries the old server position.
#[derive(Clone, Debug, Default)]
pub struct EntitySet {
    order: Vec<EntityId>,
    entities: HashMap<EntityId, Entity>,
    overlays: HashMap<EntityId, Overlay>,
}

impl EntitySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set with a fetch result, preserving service order.
    ///
    /// Duplicate ids keep their first occurrence; entities with non-finite
    /// coordinates are dropped.
    pub fn replace_all(&mut self, entities: Vec<Entity>) {
        self.order.clear();
        self.entities.clear();
        for entity in entities {
            if !entity.position().is_finite() || self.entities.contains_key(&entity.id) {
                continue;
            }
            self.order.push(entity.id.clone());
            self.entities.insert(entity.id.clone(), entity);
        }
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up an entity as last received.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Render view of one entity.
    #[must_use]
    pub fn view(&self, id: &EntityId) -> Option<EntityView<'_>> {
        let entity = self.entities.get(id)?;
        let (position, state) = match self.overlays.get(id) {
            Some(Overlay {
                dragging: Some(p), ..
            }) => (*p, RenderState::Dragging),
            Some(Overlay {
                pending: Some(p), ..
            }) => (*p, RenderState::Pending),
            _ => (entity.position(), RenderState::Confirmed),
        };
        Some(EntityView {
            entity,
            position,
            state,
        })
    }

    /// Render views in service order.
    pub fn iter(&self) -> impl Iterator<Item = EntityView<'_>> + Clone + '_ {
        self.order.iter().filter_map(|id| self.view(id))
    }

    /// Where the entity is drawn right now, ignoring a drag overlay.
    ///
    /// This is the pending optimistic position if a commit is outstanding,
    /// otherwise the confirmed one.
    #[must_use]
    pub fn resting_position(&self, id: &EntityId) -> Option<Point> {
        let pending = self.overlays.get(id).and_then(|o| o.pending);
        pending.or_else(|| self.entities.get(id).map(Entity::position))
    }

    /// Sets or clears the drag overlay.
    pub fn set_dragging(&mut self, id: &EntityId, position: Option<Point>) {
        self.update_overlay(id, |o| o.dragging = position);
    }

    /// Sets or clears the optimistic commit overlay.
    pub fn set_pending(&mut self, id: &EntityId, position: Option<Point>) {
        self.update_overlay(id, |o| o.pending = position);
    }

    /// Records a position confirmed by the service and drops the pending
    /// overlay.
    pub fn confirm(&mut self, id: &EntityId, position: Point) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.x = position.x;
            entity.y = position.y;
        }
        self.set_pending(id, None);
    }

    fn update_overlay(&mut self, id: &EntityId, f: impl FnOnce(&mut Overlay)) {
        let overlay = self.overlays.entry(id.clone()).or_default();
        f(overlay);
        if overlay.is_empty() {
            self.overlays.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Entity, EntityId, EntitySet, RenderState};

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn deserializes_service_shape() {
        let json = r#"{
            "id": "ck1", "shortId": "a1b2", "x": 10.5, "y": -3,
            "text": "hello", "imageUrl": null, "createdAt": "2025-01-01T00:00:00Z",
            "replyCount": 2, "likes": 5, "isNSFW": true
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id, id("ck1"));
        assert_eq!(entity.short_id.as_deref(), Some("a1b2"));
        assert_eq!(entity.position(), Point::new(10.5, -3.0));
        assert_eq!(entity.image_url, None);
        assert_eq!(entity.reply_count, 2);
        assert!(entity.is_nsfw);
    }

    #[test]
    fn missing_summary_fields_default() {
        let entity: Entity = serde_json::from_str(r#"{"id":"x","x":1,"y":2}"#).unwrap();
        assert_eq!(entity, Entity::new("x", 1.0, 2.0));
    }

    #[test]
    fn replace_keeps_order_and_drops_bad_rows() {
        let mut set = EntitySet::new();
        set.replace_all(vec![
            Entity::new("b", 0.0, 0.0),
            Entity::new("a", 1.0, 1.0),
            Entity::new("b", 9.0, 9.0),
            Entity::new("nan", f64::NAN, 0.0),
        ]);
        let ids: Vec<_> = set.iter().map(|v| v.entity.id.0.clone()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(set.get(&id("b")).unwrap().x, 0.0);
    }

    #[test]
    fn overlays_take_precedence_and_survive_refresh() {
        let mut set = EntitySet::new();
        set.replace_all(vec![Entity::new("a", 0.0, 0.0)]);
        set.set_pending(&id("a"), Some(Point::new(5.0, 5.0)));
        assert_eq!(set.view(&id("a")).unwrap().state, RenderState::Pending);

        set.set_dragging(&id("a"), Some(Point::new(7.0, 7.0)));
        let view = set.view(&id("a")).unwrap();
        assert_eq!(view.state, RenderState::Dragging);
        assert_eq!(view.position, Point::new(7.0, 7.0));
        assert_eq!(set.resting_position(&id("a")), Some(Point::new(5.0, 5.0)));

        set.replace_all(vec![Entity::new("a", 0.0, 0.0)]);
        assert_eq!(set.view(&id("a")).unwrap().position, Point::new(7.0, 7.0));

        set.set_dragging(&id("a"), None);
        set.confirm(&id("a"), Point::new(5.0, 5.0));
        let view = set.view(&id("a")).unwrap();
        assert_eq!(view.state, RenderState::Confirmed);
        assert_eq!(view.position, Point::new(5.0, 5.0));
    }
}
