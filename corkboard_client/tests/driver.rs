// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driver sessions against the in-memory content service, on paused time.

use std::sync::Arc;
use std::time::Duration;

use corkboard_canvas::{
    Canvas, CanvasConfig, Entity, EntityId, Event, HitTarget, PointerId, PointerInput, PointerKind,
    ViewportWindow,
};
use corkboard_client::{
    BoxFuture, CanvasHost, ContentService, Driver, MemoryContentService, ServiceError,
};
use kurbo::{Point, Size, Vec2};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const MOUSE: PointerId = PointerId(1);
const TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Recorder {
    selected: Vec<EntityId>,
    committed: Vec<(EntityId, Point)>,
    reverted: Vec<(EntityId, Point)>,
    new_entities: Vec<(usize, usize)>,
    refreshes: usize,
}

impl CanvasHost for Recorder {
    fn on_select(&mut self, id: &EntityId) {
        self.selected.push(id.clone());
    }

    fn on_position_committed(&mut self, id: &EntityId, position: Point) {
        self.committed.push((id.clone(), position));
    }

    fn on_new_entities(&mut self, previous: usize, current: usize) {
        self.new_entities.push((previous, current));
    }

    fn on_reverted(&mut self, id: &EntityId, position: Point) {
        self.reverted.push((id.clone(), position));
    }

    fn on_refresh(&mut self, _canvas: &Canvas) {
        self.refreshes += 1;
    }
}

struct Harness {
    task: JoinHandle<Driver<Recorder>>,
    cancel: CancellationToken,
    input: UnboundedSender<Event>,
}

impl Harness {
    fn start(service: Arc<dyn ContentService>, live: bool) -> Self {
        Self::start_with(CanvasConfig::default(), service, live)
    }

    fn start_with(config: CanvasConfig, service: Arc<dyn ContentService>, live: bool) -> Self {
        let canvas = Canvas::new(config, Size::new(800.0, 600.0)).unwrap();
        let mut driver = Driver::new(canvas, service, Recorder::default(), TIMEOUT);
        driver.dispatch(Event::SetLive(live));
        let cancel = driver.cancellation_token();
        let input = driver.sender();
        let task = tokio::spawn(async move {
            driver.run().await;
            driver
        });
        Self {
            task,
            cancel,
            input,
        }
    }

    fn send(&self, input: PointerInput, target: HitTarget) {
        self.input.send(Event::Pointer { input, target }).unwrap();
    }

    fn drag(&self, id: &str, from: Point, to: Point) {
        let on = HitTarget::Entity(EntityId::from(id));
        self.send(PointerInput::down(MOUSE, PointerKind::Mouse, from), on);
        self.send(PointerInput::moved(MOUSE, to), HitTarget::Board);
        self.send(PointerInput::up(MOUSE, to), HitTarget::Board);
    }

    async fn stop(self) -> Driver<Recorder> {
        self.cancel.cancel();
        self.task.await.unwrap()
    }
}

async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn board() -> Arc<MemoryContentService> {
    Arc::new(MemoryContentService::new([
        Entity::new("a", 100.0, 100.0),
        Entity::new("far", 90_000.0, 0.0),
    ]))
}

#[tokio::test(start_paused = true)]
async fn start_loads_the_visible_window() {
    let service = board();
    let session = Harness::start(service.clone(), false);
    settle(50).await;
    let driver = session.stop().await;

    let ids: Vec<_> = driver.canvas().entities().map(|v| v.entity.id.0.clone()).collect();
    assert_eq!(ids, ["a"]);
    assert_eq!(driver.host().refreshes, 1);
}

#[tokio::test(start_paused = true)]
async fn click_selects_without_committing() {
    let service = board();
    let session = Harness::start(service.clone(), false);
    settle(50).await;
    session.drag("a", Point::new(100.0, 100.0), Point::new(102.0, 101.0));
    settle(50).await;
    let driver = session.stop().await;

    assert_eq!(driver.host().selected, [EntityId::from("a")]);
    assert!(service.commit_log().is_empty());
}

#[tokio::test(start_paused = true)]
async fn drag_is_persisted() {
    let service = board();
    let session = Harness::start(service.clone(), false);
    settle(50).await;
    session.drag("a", Point::new(100.0, 100.0), Point::new(200.0, 150.0));
    settle(50).await;
    let driver = session.stop().await;

    let moved = Point::new(200.0, 150.0);
    assert_eq!(service.position_of(&EntityId::from("a")), Some(moved));
    assert_eq!(driver.host().committed, [(EntityId::from("a"), moved)]);
    assert_eq!(driver.canvas().pending_commits(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_commits_are_retried_with_backoff() {
    let service = board();
    let session = Harness::start(service.clone(), false);
    settle(50).await;
    service.fail_next_commits(2);
    session.drag("a", Point::new(100.0, 100.0), Point::new(200.0, 150.0));

    // First retry is due 500 ms after the first failure.
    settle(400).await;
    assert_eq!(service.commit_log().len(), 1);
    settle(1_500).await;
    let driver = session.stop().await;

    assert_eq!(service.commit_log().len(), 3);
    assert_eq!(
        service.position_of(&EntityId::from("a")),
        Some(Point::new(200.0, 150.0))
    );
    assert_eq!(driver.host().committed.len(), 1);
    assert!(driver.host().reverted.is_empty());
}

#[tokio::test(start_paused = true)]
async fn deleted_entity_reverts_immediately() {
    let service = board();
    let session = Harness::start(service.clone(), false);
    settle(50).await;
    service.remove(&EntityId::from("a"));
    session.drag("a", Point::new(100.0, 100.0), Point::new(200.0, 150.0));
    settle(50).await;
    let driver = session.stop().await;

    assert_eq!(service.commit_log().len(), 1);
    assert_eq!(
        driver.host().reverted,
        [(EntityId::from("a"), Point::new(100.0, 100.0))]
    );
}

/// Lists like the inner service but never answers position updates.
struct UnresponsiveCommits(Arc<MemoryContentService>);

impl ContentService for UnresponsiveCommits {
    fn list_window(&self, window: ViewportWindow) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>> {
        self.0.list_window(window)
    }

    fn list_recent(&self) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>> {
        self.0.list_recent()
    }

    fn update_position(
        &self,
        _id: EntityId,
        _position: Point,
    ) -> BoxFuture<'_, Result<Entity, ServiceError>> {
        Box::pin(std::future::pending())
    }
}

#[tokio::test(start_paused = true)]
async fn timed_out_commits_eventually_revert() {
    let service = Arc::new(UnresponsiveCommits(board()));
    let session = Harness::start(service, false);
    settle(50).await;
    session.drag("a", Point::new(100.0, 100.0), Point::new(200.0, 150.0));

    // Four attempts, each cut off after a second, with 500, 1000 and
    // 2000 ms between them.
    settle(9_000).await;
    let driver = session.stop().await;

    assert_eq!(
        driver.host().reverted,
        [(EntityId::from("a"), Point::new(100.0, 100.0))]
    );
    assert!(driver.host().committed.is_empty());
    assert_eq!(driver.canvas().pending_commits(), 0);
}

#[tokio::test(start_paused = true)]
async fn live_feed_reports_growth_after_baseline() {
    let service = board();
    let session = Harness::start(service.clone(), true);

    // Baseline poll at 5 s, then a new entity before the 10 s poll.
    settle(6_000).await;
    service.insert(Entity::new("b", 0.0, 0.0));
    settle(5_000).await;
    let driver = session.stop().await;

    assert_eq!(driver.host().new_entities, [(2, 3)]);
    assert_eq!(driver.canvas().entity_set().len(), 3);
    assert_eq!(driver.host().refreshes, 3);
}

#[tokio::test(start_paused = true)]
async fn unreachable_deadlines_leave_the_driver_idle() {
    let config = CanvasConfig {
        debounce_ms: u64::MAX,
        live_interval_ms: u64::MAX,
        ..CanvasConfig::default()
    };
    let session = Harness::start_with(config, board(), true);
    settle(50).await;
    let p = PointerId(7);
    session.send(PointerInput::down(p, PointerKind::Mouse, Point::new(10.0, 10.0)), HitTarget::Board);
    session.send(PointerInput::moved(p, Point::new(50.0, 30.0)), HitTarget::Board);
    session.send(PointerInput::up(p, Point::new(50.0, 30.0)), HitTarget::Board);
    settle(60_000).await;
    let driver = session.stop().await;

    assert_eq!(driver.canvas().camera().pan(), Vec2::new(40.0, 20.0));
    assert_eq!(driver.canvas().next_deadline(), Some(u64::MAX));
    assert_eq!(driver.host().refreshes, 1);
}
