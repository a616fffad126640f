//! Drift-free wake-up anchor for the collection loop.

use std::time::Duration;
use tokio::time::Instant;

/// Upper bound on the retry delay after a failed cycle.
pub const MAX_BACKOFF: Duration = Duration::from_secs(120);

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

pub fn backoff_for(interval: Duration) -> Duration {
    interval.min(MAX_BACKOFF)
}

/// Monotonic anchor advanced by the planned sleep of each cycle, so the time
/// spent collecting and publishing is absorbed instead of accumulating.
#[derive(Debug, Clone, Copy)]
pub struct WakeSchedule {
    next_wake: Instant,
}

impl WakeSchedule {
    pub fn starting_at(now: Instant) -> Self {
        Self { next_wake: now }
    }

    pub fn next_wake(&self) -> Instant {
        self.next_wake
    }

    /// Moves the anchor forward by `sleep` and returns the next wake instant.
    ///
    /// If the anchor lags `now` by more than one sleep period it is re-based to
    /// `now`, so an overrun produces one immediate cycle rather than a burst.
    pub fn advance(&mut self, sleep: Duration, now: Instant) -> Instant {
        self.next_wake = self
            .next_wake
            .checked_add(sleep)
            .unwrap_or_else(|| far_future(now));
        if now.saturating_duration_since(self.next_wake) > sleep {
            self.next_wake = now;
        }
        self.next_wake
    }
}

fn far_future(now: Instant) -> Instant {
    now.checked_add(FAR_FUTURE).unwrap_or(now)
}
