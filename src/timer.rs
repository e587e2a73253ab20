//! src/timer.rs
//!
//! Fixed-rate refresh timer driven from the UI loop.
//!
//! The ticker does not own a thread: the loop asks how long it may block and
//! then polls whether a tick is due. Ticks that were missed while the loop was
//! busy collapse into a single one instead of firing in a burst.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// First tick is due immediately.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: now,
        }
    }

    /// Time left until the next tick (zero when overdue).
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Consume the tick due at `now`, if any.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            // fell behind by more than one period
            self.next = now + self.period;
        }
        true
    }
}
