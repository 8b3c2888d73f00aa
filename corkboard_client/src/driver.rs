// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use corkboard_canvas::{Canvas, CommitFailure, Effect, Event, FetchFailure};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{CanvasHost, ContentService, ServiceError};

/// Runs a [`Canvas`] against a [`ContentService`] on the tokio runtime.
///
/// The driver owns the canvas and is its only caller. Host input arrives as
/// [`Event`]s on the channel returned by [`sender`](Self::sender); service
/// calls run in spawned tasks bounded by the request timeout and report back
/// on the same channel. Timer deadlines are turned into [`Event::Tick`].
pub struct Driver<H> {
    canvas: Canvas,
    service: Arc<dyn ContentService>,
    host: H,
    request_timeout: Duration,
    epoch: Instant,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl<H: fmt::Debug> fmt::Debug for Driver<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("canvas", &self.canvas)
            .field("host", &self.host)
            .field("request_timeout", &self.request_timeout)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl<H: CanvasHost> Driver<H> {
    /// Creates a driver. Nothing happens until [`run`](Self::run).
    pub fn new(
        canvas: Canvas,
        service: Arc<dyn ContentService>,
        host: H,
        request_timeout: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            canvas,
            service,
            host,
            request_timeout,
            epoch: Instant::now(),
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Channel for host input (pointer events, zoom buttons, live toggle).
    #[must_use]
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    /// Token that stops [`run`](Self::run) and abandons in-flight calls.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The driven canvas.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The host receiving outcomes.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Milliseconds since the driver was created; the canvas clock.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Starts the canvas and processes events until cancelled.
    pub async fn run(&mut self) {
        self.dispatch(Event::Start);
        loop {
            let deadline = self
                .canvas
                .next_deadline()
                .and_then(|ms| self.epoch.checked_add(Duration::from_millis(ms)));
            let next = tokio::select! {
                () = self.cancel.cancelled() => None,
                Some(event) = self.events_rx.recv() => Some(event),
                () = sleep_until(deadline) => Some(Event::Tick),
            };
            let Some(event) = next else {
                info!("canvas driver shutting down");
                break;
            };
            self.dispatch(event);
        }
    }

    /// Feeds one event to the canvas and carries out the resulting effects.
    pub fn dispatch(&mut self, event: Event) {
        let refreshes = match &event {
            Event::WindowFetched { generation, result } => {
                result.is_ok() && *generation == self.canvas.window_generation()
            }
            Event::LiveFetched { generation, result } => {
                result.is_ok() && *generation == self.canvas.live_generation()
            }
            _ => false,
        };
        let now = self.now_ms();
        for effect in self.canvas.handle(now, event) {
            self.perform(effect);
        }
        if refreshes {
            self.host.on_refresh(&self.canvas);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWindow { generation, window } => {
                let service = Arc::clone(&self.service);
                let limit = self.request_timeout;
                self.spawn_call(async move {
                    let result = bounded(limit, service.list_window(window)).await;
                    if let Err(err) = &result {
                        warn!(generation = generation.0, %err, "windowed fetch failed");
                    }
                    Event::WindowFetched {
                        generation,
                        result: result.map_err(FetchFailure::from),
                    }
                });
            }
            Effect::FetchLive { generation } => {
                let service = Arc::clone(&self.service);
                let limit = self.request_timeout;
                self.spawn_call(async move {
                    let result = bounded(limit, service.list_recent()).await;
                    if let Err(err) = &result {
                        warn!(generation = generation.0, %err, "live fetch failed");
                    }
                    Event::LiveFetched {
                        generation,
                        result: result.map_err(FetchFailure::from),
                    }
                });
            }
            Effect::CommitPosition {
                ticket,
                id,
                position,
                attempt,
            } => {
                let service = Arc::clone(&self.service);
                let limit = self.request_timeout;
                self.spawn_call(async move {
                    debug!(entity = %id, attempt, "committing position");
                    let result = bounded(limit, service.update_position(id, position)).await;
                    Event::CommitFinished {
                        ticket,
                        result: result.map(drop).map_err(CommitFailure::from),
                    }
                });
            }
            Effect::Select(id) => self.host.on_select(&id),
            Effect::PositionCommitted { id, position } => {
                self.host.on_position_committed(&id, position);
            }
            Effect::NewEntities { previous, current } => {
                self.host.on_new_entities(previous, current);
            }
            Effect::Reverted { id, position } => self.host.on_reverted(&id, position),
        }
    }

    fn spawn_call<F>(&self, call: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let cancel = self.cancel.child_token();
        tokio::spawn(async move {
            tokio::select! {
                event = call => {
                    if tx.send(event).is_err() {
                        debug!("driver stopped before a service call completed");
                    }
                }
                () = cancel.cancelled() => {}
            }
        });
    }
}

async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ServiceError>>,
) -> Result<T, ServiceError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(ServiceError::Timeout(limit)))
}

// `None` covers both "no timer" and a deadline past what `Instant` can hold.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
