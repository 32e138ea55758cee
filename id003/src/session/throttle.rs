// id003-rs/id003/src/session/throttle.rs

use std::time::{Duration, Instant};

/// Leading and trailing edge throttle: the first value in a window goes out
/// at once, later ones are coalesced and the most recent one goes out when
/// the window closes.
#[derive(Debug)]
pub struct Throttle<T> {
    window: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Throttle with the given window. Nothing has been emitted yet.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emit: None,
            pending: None,
        }
    }

    /// Offer a value. Returns it back when it may be emitted now.
    pub fn offer(&mut self, value: T, now: Instant) -> Option<T> {
        match self.last_emit {
            Some(at) if now.duration_since(at) < self.window => {
                self.pending = Some(value);
                None
            }
            _ => {
                self.last_emit = Some(now);
                Some(value)
            }
        }
    }

    /// Coalesced value whose window has closed, if any.
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        let due = self.next_deadline().is_some_and(|d| now >= d);
        if !due {
            return None;
        }
        self.last_emit = Some(now);
        self.pending.take()
    }

    /// When the pending value becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (&self.pending, self.last_emit) {
            (Some(_), Some(at)) => Some(at + self.window),
            _ => None,
        }
    }

    /// Whether a coalesced value is waiting.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
