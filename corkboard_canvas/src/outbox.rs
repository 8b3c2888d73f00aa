// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use kurbo::Point;

use crate::{CommitTicket, EntityId};

#[derive(Clone, Debug)]
pub(crate) struct Commit {
    pub(crate) ticket: CommitTicket,
    pub(crate) id: EntityId,
    pub(crate) position: Point,
    pub(crate) attempt: u32,
    /// Confirmed position when the commit was queued.
    pub(crate) revert_to: Point,
}

/// Outstanding position commits, at most one per entity.
///
/// A newer commit for the same entity supersedes the older one: its ticket
/// is forgotten, so a late completion for it is ignored.
#[derive(Clone, Debug, Default)]
pub(crate) struct Outbox {
    next_ticket: u64,
    commits: HashMap<EntityId, Commit>,
}

impl Outbox {
    /// Queues a first attempt, superseding any earlier commit for `id`.
    pub(crate) fn enqueue(&mut self, id: EntityId, position: Point, revert_to: Point) -> Commit {
        self.next_ticket += 1;
        let commit = Commit {
            ticket: CommitTicket(self.next_ticket),
            id: id.clone(),
            position,
            attempt: 1,
            revert_to,
        };
        self.commits.insert(id, commit.clone());
        commit
    }

    /// The live commit for `ticket`, if it has not been superseded.
    pub(crate) fn get(&self, ticket: CommitTicket) -> Option<&Commit> {
        self.commits.values().find(|c| c.ticket == ticket)
    }

    /// Removes and returns the live commit for `ticket`.
    pub(crate) fn finish(&mut self, ticket: CommitTicket) -> Option<Commit> {
        let id = self.get(ticket)?.id.clone();
        self.commits.remove(&id)
    }

    /// Bumps the attempt counter of the commit for `id` and returns it.
    pub(crate) fn retry(&mut self, id: &EntityId) -> Option<Commit> {
        let commit = self.commits.get_mut(id)?;
        commit.attempt += 1;
        Some(commit.clone())
    }

    /// Number of outstanding commits.
    pub(crate) fn len(&self) -> usize {
        self.commits.len()
    }
}
