// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[derive(Clone, Debug)]
struct Entry<K> {
    deadline: u64,
    seq: u64,
    key: K,
}

/// Keyed one-shot timers ordered by deadline.
///
/// Each key has at most one pending deadline. Timers with equal deadlines
/// fire in the order they were (re)scheduled.
///
/// The queue is expected to stay small (a handful of debounce, poll and
/// retry timers), so it is a flat vector scanned linearly.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: PartialEq> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire at `deadline`, replacing any pending deadline
    /// for the same key.
    pub fn schedule(&mut self, key: K, deadline: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.deadline = deadline;
            entry.seq = seq;
        } else {
            self.entries.push(Entry { deadline, seq, key });
        }
    }

    /// Schedules `key` only if it is not already pending.
    ///
    /// Returns `true` if a new timer was added.
    pub fn schedule_if_absent(&mut self, key: K, deadline: u64) -> bool {
        if self.is_scheduled(&key) {
            return false;
        }
        self.schedule(key, deadline);
        true
    }

    /// Cancels the pending timer for `key`. Returns `true` if one existed.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != *key);
        self.entries.len() != before
    }

    /// Cancels every timer matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.entries.retain(|e| !pred(&e.key));
    }

    /// Returns `true` if `key` has a pending deadline.
    #[must_use]
    pub fn is_scheduled(&self, key: &K) -> bool {
        self.entries.iter().any(|e| e.key == *key)
    }

    /// Pending deadline for `key`.
    #[must_use]
    pub fn deadline_of(&self, key: &K) -> Option<u64> {
        self.entries.iter().find(|e| e.key == *key).map(|e| e.deadline)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    ///
    /// Call repeatedly to drain everything that is due.
    pub fn pop_due(&mut self, now: u64) -> Option<K> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(index).key)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels every timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
