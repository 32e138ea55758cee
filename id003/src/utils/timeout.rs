//! Timeout helpers used across the crate.
//!
//! Timers here are plain values holding a deadline. Nothing runs in the
//! background: the owner asks `fire(now)` whenever it gets control.

use std::time::{Duration, Instant};

/// Default read timeout in milliseconds used by transports when a caller
/// doesn't provide an explicit timeout.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 20;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default read timeout as Duration.
pub fn default_read_timeout() -> Duration {
    ms(DEFAULT_READ_TIMEOUT_MS)
}

/// One-shot or periodic deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    deadline: Instant,
    period: Option<Duration>,
}

impl Timer {
    /// Fires once, `after` from `now`.
    pub fn once(now: Instant, after: Duration) -> Self {
        Self {
            deadline: now + after,
            period: None,
        }
    }

    /// Fires every `period`, first at `now + period`.
    pub fn every(now: Instant, period: Duration) -> Self {
        Self {
            deadline: now + period,
            period: Some(period),
        }
    }

    /// Next firing instant.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the timer re-arms after firing.
    pub fn is_periodic(&self) -> bool {
        self.period.is_some()
    }

    /// Whether the deadline has passed, without firing.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Returns true when due. Periodic timers re-arm relative to `now`, so a
    /// late tick never produces a burst of catch-up firings.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        if let Some(period) = self.period {
            self.deadline = now + period;
        }
        true
    }
}

/// Fire an optional one-shot timer, clearing it once it has fired.
pub fn fire_once(slot: &mut Option<Timer>, now: Instant) -> bool {
    match slot {
        Some(timer) if timer.is_due(now) => {
            *slot = None;
            true
        }
        _ => false,
    }
}

/// Earliest of several optional deadlines.
pub fn earliest<I: IntoIterator<Item = Option<Instant>>>(deadlines: I) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
