// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_event_state::reposition::{Release, RepositionPhase, RepositionState};
use corkboard_gesture::{GestureHandler, GesturePhase, PointerId, PointerInput};
use corkboard_timing::{Backoff, TimerQueue};
use corkboard_view2d::{Camera, Minimap, ViewportWindow};
use kurbo::{Point, Size};
use tracing::{debug, info, warn};

use crate::outbox::Outbox;
use crate::{
    CanvasConfig, CanvasError, CommitFailure, CommitTicket, Effect, Entity, EntityId, EntitySet,
    EntityView, Event, FetchFailure, Generation, HitTarget,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Timer {
    WindowFetch,
    LivePoll,
    CommitRetry(EntityId),
}

/// The board's whole interactive state as an explicit reducer.
///
/// [`Canvas::handle`] takes a timestamp (monotonic milliseconds) and an
/// [`Event`], updates state synchronously and returns the [`Effect`]s the
/// host must carry out. Completions of those effects come back in as events
/// tagged with the generation or ticket they were issued with, so stale or
/// superseded responses can be recognized and dropped.
///
/// The host is also responsible for time: after handling an event it should
/// arrange to send [`Event::Tick`] at [`Canvas::next_deadline`].
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    backoff: Backoff,
    camera: Camera,
    gestures: GestureHandler,
    reposition: RepositionState<EntityId>,
    // Contact driving the reposition session and its latest sample.
    drag_contact: Option<(PointerId, Point)>,
    // Confirmed position of the pressed entity when the drag began.
    drag_origin: Option<Point>,
    entities: EntitySet,
    selected: Option<EntityId>,
    timers: TimerQueue<Timer>,
    window_generation: Generation,
    live_generation: Generation,
    live: bool,
    show_nsfw: bool,
    live_baseline: Option<usize>,
    last_window: Option<ViewportWindow>,
    outbox: Outbox,
    started: bool,
}

impl Canvas {
    /// Creates a canvas for a surface of `screen` pixels.
    ///
    /// The camera starts at zoom 1 with zero pan. Nothing is fetched until
    /// [`Event::Start`].
    pub fn new(config: CanvasConfig, screen: Size) -> Result<Self, CanvasError> {
        config.validate()?;
        let mut camera = Camera::new(screen);
        camera.set_zoom_limits(config.min_zoom, config.max_zoom);
        Ok(Self {
            backoff: config.backoff(),
            gestures: GestureHandler::new(config.gesture()),
            reposition: RepositionState::new(config.drag_threshold_px)
                .with_tracking(config.drag_tracking.into()),
            show_nsfw: config.show_nsfw,
            config,
            camera,
            drag_contact: None,
            drag_origin: None,
            entities: EntitySet::new(),
            selected: None,
            timers: TimerQueue::new(),
            window_generation: Generation::default(),
            live_generation: Generation::default(),
            live: false,
            live_baseline: None,
            last_window: None,
            outbox: Outbox::default(),
            started: false,
        })
    }

    /// Applies one event and returns the resulting effects in order.
    pub fn handle(&mut self, now: u64, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::Start => self.start(now, &mut effects),
            Event::Resize(size) => {
                if self.camera.set_screen_size(size) {
                    self.camera_changed(now);
                }
            }
            Event::Pointer { input, target } => self.on_pointer(now, input, target, &mut effects),
            Event::ZoomBy(delta) => {
                if self.camera.zoom_by(delta) {
                    self.camera_changed(now);
                }
            }
            Event::CenterOn(point) => {
                if self.camera.center_on(point) {
                    self.camera_changed(now);
                }
            }
            Event::ResetView => {
                if self.camera.reset() {
                    self.camera_changed(now);
                }
            }
            Event::SetLive(live) => self.set_live(now, live),
            Event::SetShowNsfw(show) => self.show_nsfw = show,
            Event::WindowFetched { generation, result } => {
                self.on_window_fetched(generation, result);
            }
            Event::LiveFetched { generation, result } => {
                self.on_live_fetched(generation, result, &mut effects);
            }
            Event::CommitFinished { ticket, result } => {
                self.on_commit_finished(now, ticket, result, &mut effects);
            }
            Event::Tick => {}
        }
        self.fire_due(now, &mut effects);
        effects
    }

    /// Earliest time at which [`Event::Tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The configuration this canvas was built with.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Visible entities with their render positions, in service order.
    ///
    /// Entities flagged NSFW are skipped unless [`Canvas::show_nsfw`] is on.
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> + Clone + '_ {
        let show_nsfw = self.show_nsfw;
        self.entities
            .iter()
            .filter(move |view| show_nsfw || !view.entity.is_nsfw)
    }

    /// Whether NSFW entities are rendered.
    #[must_use]
    pub fn show_nsfw(&self) -> bool {
        self.show_nsfw
    }

    /// The underlying entity set.
    #[must_use]
    pub fn entity_set(&self) -> &EntitySet {
        &self.entities
    }

    /// Last clicked entity.
    #[must_use]
    pub fn selected(&self) -> Option<&EntityId> {
        self.selected.as_ref()
    }

    /// Whether the live feed is on.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Latest issued windowed-fetch generation.
    #[must_use]
    pub fn window_generation(&self) -> Generation {
        self.window_generation
    }

    /// Latest issued live-fetch generation.
    #[must_use]
    pub fn live_generation(&self) -> Generation {
        self.live_generation
    }

    /// Window of the latest issued windowed fetch.
    #[must_use]
    pub fn last_window(&self) -> Option<ViewportWindow> {
        self.last_window
    }

    /// Number of position commits not yet confirmed or reverted.
    #[must_use]
    pub fn pending_commits(&self) -> usize {
        self.outbox.len()
    }

    /// Current camera gesture.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    /// Current reposition phase.
    #[must_use]
    pub fn reposition_phase(&self) -> RepositionPhase {
        self.reposition.phase()
    }

    /// Projects every visible entity and the on-screen rectangle into a
    /// minimap of `size` pixels. `None` when there are no visible entities.
    #[must_use]
    pub fn minimap(&self, size: Size) -> Option<Minimap> {
        Minimap::project(
            self.entities().map(|view| view.position),
            &self.camera,
            size,
            self.config.minimap_padding,
        )
    }

    fn start(&mut self, now: u64, effects: &mut Vec<Effect>) {
        if self.started {
            return;
        }
        self.started = true;
        self.issue_window_fetch(effects);
        if self.live {
            self.timers
                .schedule(Timer::LivePoll, now.saturating_add(self.config.live_interval_ms));
        }
    }

    fn camera_changed(&mut self, now: u64) {
        if self.started {
            self.timers
                .schedule(Timer::WindowFetch, now.saturating_add(self.config.debounce_ms));
        }
    }

    fn set_live(&mut self, now: u64, live: bool) {
        if self.live == live {
            return;
        }
        self.live = live;
        if live {
            self.live_baseline = None;
            if self.started {
                self.timers
                    .schedule(Timer::LivePoll, now.saturating_add(self.config.live_interval_ms));
            }
        } else {
            self.timers.cancel(&Timer::LivePoll);
            // Anything still in flight belongs to the old session.
            self.live_generation.bump();
        }
        info!(live, "live feed toggled");
    }

    fn fire_due(&mut self, now: u64, effects: &mut Vec<Effect>) {
        while let Some(timer) = self.timers.pop_due(now) {
            match timer {
                Timer::WindowFetch => self.issue_window_fetch(effects),
                Timer::LivePoll => {
                    if !self.live {
                        continue;
                    }
                    let generation = self.live_generation.bump();
                    debug!(generation = generation.0, "polling live feed");
                    effects.push(Effect::FetchLive { generation });
                    self.timers
                        .schedule(Timer::LivePoll, now.saturating_add(self.config.live_interval_ms));
                }
                Timer::CommitRetry(id) => {
                    if let Some(commit) = self.outbox.retry(&id) {
                        debug!(entity = %commit.id, attempt = commit.attempt, "retrying position commit");
                        effects.push(Effect::CommitPosition {
                            ticket: commit.ticket,
                            id: commit.id,
                            position: commit.position,
                            attempt: commit.attempt,
                        });
                    }
                }
            }
        }
    }

    fn issue_window_fetch(&mut self, effects: &mut Vec<Effect>) {
        match ViewportWindow::around(&self.camera, self.config.buffer_factor) {
            Ok(window) => {
                let generation = self.window_generation.bump();
                debug!(
                    generation = generation.0,
                    min_x = window.min_x,
                    max_x = window.max_x,
                    min_y = window.min_y,
                    max_y = window.max_y,
                    "issuing windowed fetch"
                );
                self.last_window = Some(window);
                effects.push(Effect::FetchWindow { generation, window });
            }
            Err(err) => {
                let err = CanvasError::from(err);
                warn!(error = %err, "skipping windowed fetch");
            }
        }
    }

    fn on_window_fetched(&mut self, generation: Generation, result: Result<Vec<Entity>, FetchFailure>) {
        if generation != self.window_generation {
            debug!(
                generation = generation.0,
                latest = self.window_generation.0,
                "dropping stale window response"
            );
            return;
        }
        match result {
            Ok(entities) => {
                debug!(generation = generation.0, count = entities.len(), "applying window response");
                self.entities.replace_all(entities);
            }
            Err(failure) => {
                warn!(generation = generation.0, error = %failure, "windowed fetch failed; keeping previous entities");
            }
        }
    }

    fn on_live_fetched(
        &mut self,
        generation: Generation,
        result: Result<Vec<Entity>, FetchFailure>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.live || generation != self.live_generation {
            debug!(
                generation = generation.0,
                latest = self.live_generation.0,
                "dropping stale live response"
            );
            return;
        }
        match result {
            Ok(entities) => {
                let current = entities.len();
                if let Some(previous) = self.live_baseline {
                    if current > previous {
                        info!(previous, current, "new entities on the live feed");
                        effects.push(Effect::NewEntities { previous, current });
                    }
                }
                self.live_baseline = Some(current);
                self.entities.replace_all(entities);
            }
            Err(failure) => {
                warn!(generation = generation.0, error = %failure, "live fetch failed; keeping previous entities");
            }
        }
    }

    fn on_pointer(
        &mut self,
        now: u64,
        input: PointerInput,
        target: HitTarget,
        effects: &mut Vec<Effect>,
    ) {
        let drag_id = self.drag_contact.map(|(id, _)| id);
        match input {
            PointerInput::Down { id, kind, position } => {
                if let Some((drag_id, last)) = self.drag_contact {
                    if drag_id != id {
                        // A second contact turns the drag into a camera gesture.
                        self.cancel_drag();
                        self.feed_gesture(now, PointerInput::down(drag_id, kind, last));
                        self.feed_gesture(now, input);
                    }
                    return;
                }
                match target {
                    HitTarget::Entity(entity) if self.gestures.contact_count() == 0 => {
                        if !self.press_entity(id, position, entity) {
                            self.feed_gesture(now, input);
                        }
                    }
                    _ => self.feed_gesture(now, input),
                }
            }
            PointerInput::Move { id, position } if drag_id == Some(id) => {
                if !position.is_finite() {
                    return;
                }
                self.drag_contact = Some((id, position));
                let key = self.reposition.key();
                if let (Some(visual), Some(key)) =
                    (self.reposition.update(position, self.camera.zoom()), key)
                {
                    self.entities.set_dragging(&key, Some(visual));
                }
            }
            PointerInput::Up { id, position } if drag_id == Some(id) => {
                self.release_drag(position, effects);
            }
            PointerInput::Cancel { id } if drag_id == Some(id) => self.cancel_drag(),
            _ => self.feed_gesture(now, input),
        }
    }

    fn press_entity(&mut self, pointer: PointerId, screen: Point, entity: EntityId) -> bool {
        let Some(start) = self.entities.resting_position(&entity) else {
            return false;
        };
        let origin = self.entities.get(&entity).map(Entity::position);
        if !self.reposition.press(entity, screen, start) {
            return false;
        }
        self.drag_contact = Some((pointer, screen));
        self.drag_origin = origin;
        true
    }

    fn release_drag(&mut self, screen: Point, effects: &mut Vec<Effect>) {
        self.drag_contact = None;
        let origin = self.drag_origin.take();
        match self.reposition.release(screen, self.camera.zoom()) {
            Some(Release::Click(id)) => {
                self.entities.set_dragging(&id, None);
                debug!(entity = %id, "entity selected");
                self.selected = Some(id.clone());
                effects.push(Effect::Select(id));
            }
            Some(Release::Commit { key, position }) => {
                self.entities.set_dragging(&key, None);
                // A refresh may have dropped the entity mid-drag; fall back
                // to where it was confirmed at press time.
                let revert_to = self
                    .entities
                    .get(&key)
                    .map(Entity::position)
                    .or(origin)
                    .unwrap_or(position);
                self.entities.set_pending(&key, Some(position));
                self.timers.cancel(&Timer::CommitRetry(key.clone()));
                let commit = self.outbox.enqueue(key, position, revert_to);
                debug!(entity = %commit.id, x = position.x, y = position.y, "queueing position commit");
                effects.push(Effect::CommitPosition {
                    ticket: commit.ticket,
                    id: commit.id,
                    position: commit.position,
                    attempt: commit.attempt,
                });
            }
            None => {}
        }
    }

    fn cancel_drag(&mut self) {
        self.drag_contact = None;
        self.drag_origin = None;
        if let Some(cancelled) = self.reposition.cancel() {
            self.entities.set_dragging(&cancelled.key, None);
            debug!(entity = %cancelled.key, "drag cancelled");
        }
    }

    fn feed_gesture(&mut self, now: u64, input: PointerInput) {
        if self.gestures.encode(&input, &mut self.camera) {
            self.camera_changed(now);
        }
    }

    fn on_commit_finished(
        &mut self,
        now: u64,
        ticket: CommitTicket,
        result: Result<(), CommitFailure>,
        effects: &mut Vec<Effect>,
    ) {
        let Some(commit) = self.outbox.get(ticket).cloned() else {
            debug!(ticket = ticket.0, "ignoring completion of a superseded commit");
            return;
        };
        match result {
            Ok(()) => {
                self.outbox.finish(ticket);
                self.entities.confirm(&commit.id, commit.position);
                info!(
                    entity = %commit.id,
                    x = commit.position.x,
                    y = commit.position.y,
                    "position committed"
                );
                effects.push(Effect::PositionCommitted {
                    id: commit.id,
                    position: commit.position,
                });
            }
            Err(failure) => {
                let delay = if failure.retryable {
                    self.backoff.delay_after(commit.attempt)
                } else {
                    None
                };
                if let Some(delay) = delay {
                    warn!(
                        entity = %commit.id,
                        attempt = commit.attempt,
                        retry_in_ms = delay,
                        error = %failure,
                        "position commit failed; will retry"
                    );
                    self.timers
                        .schedule(Timer::CommitRetry(commit.id), now.saturating_add(delay));
                    return;
                }
                self.outbox.finish(ticket);
                self.entities.set_pending(&commit.id, None);
                let position = self
                    .entities
                    .get(&commit.id)
                    .map(Entity::position)
                    .unwrap_or(commit.revert_to);
                warn!(
                    entity = %commit.id,
                    attempt = commit.attempt,
                    error = %failure,
                    "position commit failed; reverting"
                );
                effects.push(Effect::Reverted {
                    id: commit.id,
                    position,
                });
            }
        }
    }
}
