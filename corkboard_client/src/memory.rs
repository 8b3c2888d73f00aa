// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::{Mutex, MutexGuard, PoisonError};

use corkboard_canvas::{Entity, EntityId, ViewportWindow};
use kurbo::Point;

use crate::{BoxFuture, ContentService, ServiceError};

/// Maximum number of entities returned by one listing.
pub const MAX_RESULTS: usize = 200;

#[derive(Debug, Default)]
struct State {
    // Insertion order; later entries are newer.
    entities: Vec<Entity>,
    fail_fetches: usize,
    fail_commits: usize,
    commits: Vec<(EntityId, Point)>,
}

impl State {
    fn newest_first(&self, keep: impl Fn(&Entity) -> bool) -> Vec<Entity> {
        let mut out: Vec<Entity> = self.entities.iter().rev().filter(|e| keep(e)).cloned().collect();
        // Stable, so entities without a timestamp stay in reverse insertion order.
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(MAX_RESULTS);
        out
    }

    fn take_failure(counter: &mut usize) -> bool {
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }
}

/// In-process [`ContentService`] with injectable failures.
///
/// Listings filter by inclusive bounds, order newest first (by `created_at`,
/// then by insertion) and cap at [`MAX_RESULTS`].
#[derive(Debug, Default)]
pub struct MemoryContentService {
    state: Mutex<State>,
}

impl MemoryContentService {
    /// Creates a service holding `entities`, oldest first.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            state: Mutex::new(State {
                entities: entities.into_iter().collect(),
                ..State::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a new entity, newer than every existing one.
    pub fn insert(&self, entity: Entity) {
        self.state().entities.push(entity);
    }

    /// Deletes `id`, as if another user removed it.
    pub fn remove(&self, id: &EntityId) -> Option<Entity> {
        let mut state = self.state();
        let index = state.entities.iter().position(|e| &e.id == id)?;
        Some(state.entities.remove(index))
    }

    /// Stored position of `id`.
    #[must_use]
    pub fn position_of(&self, id: &EntityId) -> Option<Point> {
        self.state()
            .entities
            .iter()
            .find(|e| &e.id == id)
            .map(Entity::position)
    }

    /// Number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state().entities.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state().entities.is_empty()
    }

    /// Makes the next `n` listings fail with [`ServiceError::Unavailable`].
    pub fn fail_next_fetches(&self, n: usize) {
        self.state().fail_fetches = n;
    }

    /// Makes the next `n` position updates fail with
    /// [`ServiceError::Unavailable`].
    pub fn fail_next_commits(&self, n: usize) {
        self.state().fail_commits = n;
    }

    /// Every position update received, including failed ones, in order.
    #[must_use]
    pub fn commit_log(&self) -> Vec<(EntityId, Point)> {
        self.state().commits.clone()
    }

    fn list(&self, window: Option<ViewportWindow>) -> Result<Vec<Entity>, ServiceError> {
        let mut state = self.state();
        if State::take_failure(&mut state.fail_fetches) {
            return Err(ServiceError::Unavailable("injected fetch failure".into()));
        }
        Ok(match window {
            Some(window) => state.newest_first(move |e| window.contains_point(e.position())),
            None => state.newest_first(|_| true),
        })
    }

    fn update(&self, id: EntityId, position: Point) -> Result<Entity, ServiceError> {
        let mut state = self.state();
        state.commits.push((id.clone(), position));
        if State::take_failure(&mut state.fail_commits) {
            return Err(ServiceError::Unavailable("injected commit failure".into()));
        }
        let Some(entity) = state.entities.iter_mut().find(|e| e.id == id) else {
            return Err(ServiceError::NotFound(id));
        };
        entity.x = position.x;
        entity.y = position.y;
        Ok(entity.clone())
    }
}

impl ContentService for MemoryContentService {
    fn list_window(&self, window: ViewportWindow) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>> {
        Box::pin(async move { self.list(Some(window)) })
    }

    fn list_recent(&self) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>> {
        Box::pin(async move { self.list(None) })
    }

    fn update_position(
        &self,
        id: EntityId,
        position: Point,
    ) -> BoxFuture<'_, Result<Entity, ServiceError>> {
        Box::pin(async move { self.update(id, position) })
    }
}

#[cfg(test)]
mod tests {
    use corkboard_canvas::{Entity, EntityId, ViewportWindow};
    use kurbo::Point;

    use super::{MAX_RESULTS, MemoryContentService};
    use crate::ServiceError;

    fn window(min: f64, max: f64) -> ViewportWindow {
        ViewportWindow {
            min_x: min,
            max_x: max,
            min_y: min,
            max_y: max,
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let service = MemoryContentService::new([
            Entity::new("edge", 10.0, 10.0),
            Entity::new("inside", 0.0, 0.0),
            Entity::new("outside", 10.5, 0.0),
        ]);
        let ids: Vec<_> = service
            .list(Some(window(-10.0, 10.0)))
            .unwrap()
            .into_iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(ids, ["inside", "edge"]);
    }

    #[test]
    fn listing_is_newest_first_and_capped() {
        let service = MemoryContentService::new(
            (0..250).map(|i| Entity::new(format!("e{i}"), f64::from(i), 0.0)),
        );
        let all = service.list(None).unwrap();
        assert_eq!(all.len(), MAX_RESULTS);
        assert_eq!(all[0].id.0, "e249");

        let mut dated = Entity::new("dated", 0.0, 0.0);
        dated.created_at = Some("2025-06-01T00:00:00Z".into());
        service.insert(Entity::new("undated", 0.0, 0.0));
        service.insert(dated);
        let all = service.list(None).unwrap();
        assert_eq!(all[0].id.0, "dated");
        assert_eq!(all[1].id.0, "undated");
    }

    #[test]
    fn injected_failures_are_consumed() {
        let service = MemoryContentService::new([Entity::new("a", 0.0, 0.0)]);
        service.fail_next_fetches(1);
        assert!(matches!(service.list(None), Err(ServiceError::Unavailable(_))));
        assert_eq!(service.list(None).unwrap().len(), 1);

        service.fail_next_commits(1);
        let id = EntityId::from("a");
        assert!(service.update(id.clone(), Point::new(5.0, 5.0)).is_err());
        assert_eq!(service.position_of(&id), Some(Point::ZERO));
        service.update(id.clone(), Point::new(5.0, 5.0)).unwrap();
        assert_eq!(service.position_of(&id), Some(Point::new(5.0, 5.0)));
        assert_eq!(service.commit_log().len(), 2);
    }

    #[test]
    fn unknown_entity_is_not_found() {
        let service = MemoryContentService::default();
        let err = service.update(EntityId::from("ghost"), Point::ZERO).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(id) if id.0 == "ghost"));
    }
}
