// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Capped exponential backoff with a fixed attempt budget.
///
/// Attempt numbers start at 1 for the first try. The delay before attempt
/// `n + 1` is `initial * 2^(n - 1)`, capped at `max`. Once `max_attempts`
/// have been made there is no further delay: the operation has failed
/// terminally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    /// Total attempts allowed, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds.
    pub initial_ms: u64,
    /// Upper bound for any single delay, in milliseconds.
    pub max_ms: u64,
}

impl Backoff {
    /// Creates a backoff policy.
    #[must_use]
    pub const fn new(max_attempts: u32, initial_ms: u64, max_ms: u64) -> Self {
        Self {
            max_attempts,
            initial_ms,
            max_ms,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, 0, 0)
    }

    /// Delay to wait after `attempt` failed, or `None` if the budget is spent.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Option<u64> {
        if attempt == 0 || attempt >= self.max_attempts {
            return None;
        }
        let shift = (attempt - 1).min(63);
        let delay = self
            .initial_ms
            .checked_mul(1_u64 << shift)
            .unwrap_or(u64::MAX);
        Some(delay.min(self.max_ms.max(self.initial_ms)))
    }

    /// Returns `true` if another attempt is allowed after `attempt`.
    #[must_use]
    pub fn can_retry(&self, attempt: u32) -> bool {
        self.delay_after(attempt).is_some()
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(4, 500, 8_000)
    }
}

#[cfg(test)]
mod tests {
    use super::Backoff;

    #[test]
    fn delays_double_until_capped() {
        let b = Backoff::new(10, 500, 3_000);
        assert_eq!(b.delay_after(1), Some(500));
        assert_eq!(b.delay_after(2), Some(1_000));
        assert_eq!(b.delay_after(3), Some(2_000));
        assert_eq!(b.delay_after(4), Some(3_000));
        assert_eq!(b.delay_after(9), Some(3_000));
        assert_eq!(b.delay_after(10), None);
    }

    #[test]
    fn default_allows_three_retries() {
        let b = Backoff::default();
        assert!(b.can_retry(1));
        assert!(b.can_retry(3));
        assert!(!b.can_retry(4));
    }

    #[test]
    fn none_never_retries() {
        assert_eq!(Backoff::none().delay_after(1), None);
        assert_eq!(Backoff::default().delay_after(0), None);
    }

    #[test]
    fn huge_attempt_counts_do_not_overflow() {
        let b = Backoff::new(u32::MAX, 1_000, 60_000);
        assert_eq!(b.delay_after(200), Some(60_000));
    }
}
