// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_gesture::PointerInput;
use corkboard_view2d::ViewportWindow;
use kurbo::{Point, Size};

use crate::{CommitFailure, Entity, EntityId, FetchFailure};

/// Monotonic tag of a fetch request on one fetch path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub(crate) fn bump(&mut self) -> Self {
        self.0 += 1;
        *self
    }
}

/// Identifies one queued position commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommitTicket(pub u64);

/// What a pointer press landed on, as decided by the host's hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty board background.
    Board,
    /// A rendered entity.
    Entity(EntityId),
}

/// Inputs to [`Canvas::handle`](crate::Canvas::handle).
#[derive(Clone, Debug)]
pub enum Event {
    /// Begin the session: issue the first windowed fetch and arm timers.
    Start,
    /// The host surface was resized.
    Resize(Size),
    /// Raw pointer or wheel input together with its hit target.
    ///
    /// The target only matters for presses; later samples of the same
    /// contact follow whatever the press started.
    Pointer {
        /// The input.
        input: PointerInput,
        /// Hit-test result at the input position.
        target: HitTarget,
    },
    /// Programmatic zoom change (for example zoom buttons).
    ZoomBy(f64),
    /// Center the camera on a world point.
    CenterOn(Point),
    /// Restore zoom 1 and zero pan.
    ResetView,
    /// Turn the live feed on or off.
    SetLive(bool),
    /// Show or hide entities flagged NSFW.
    SetShowNsfw(bool),
    /// Completion of a [`Effect::FetchWindow`].
    WindowFetched {
        /// Generation of the request.
        generation: Generation,
        /// Entities or the failure.
        result: Result<Vec<Entity>, FetchFailure>,
    },
    /// Completion of a [`Effect::FetchLive`].
    LiveFetched {
        /// Generation of the request.
        generation: Generation,
        /// Entities or the failure.
        result: Result<Vec<Entity>, FetchFailure>,
    },
    /// Completion of a [`Effect::CommitPosition`].
    CommitFinished {
        /// Ticket of the request.
        ticket: CommitTicket,
        /// Acknowledgement or the failure.
        result: Result<(), CommitFailure>,
    },
    /// Time passed; fire due timers.
    Tick,
}

/// Work requested by the reducer. Effects are the only place where network
/// calls or host callbacks happen.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Query entities inside `window`; report back with
    /// [`Event::WindowFetched`].
    FetchWindow {
        /// Tag to echo back.
        generation: Generation,
        /// Buffered world-space query window.
        window: ViewportWindow,
    },
    /// Fetch the recent-entity list; report back with [`Event::LiveFetched`].
    FetchLive {
        /// Tag to echo back.
        generation: Generation,
    },
    /// Persist a new position; report back with [`Event::CommitFinished`].
    CommitPosition {
        /// Tag to echo back.
        ticket: CommitTicket,
        /// Entity to move.
        id: EntityId,
        /// New world position.
        position: Point,
        /// 1 for the first try, then counting retries.
        attempt: u32,
    },
    /// The user clicked an entity.
    Select(EntityId),
    /// The service confirmed a position commit.
    PositionCommitted {
        /// Entity that moved.
        id: EntityId,
        /// Confirmed world position.
        position: Point,
    },
    /// The live feed returned more entities than the previous poll.
    NewEntities {
        /// Count at the previous poll.
        previous: usize,
        /// Count now.
        current: usize,
    },
    /// A commit failed for good; the entity was put back.
    Reverted {
        /// Entity that snapped back.
        id: EntityId,
        /// Last confirmed world position.
        position: Point,
    },
}
