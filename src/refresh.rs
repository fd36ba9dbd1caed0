//! Periodic refresh timer
//!
//! Produces `InputEvent::Tick` on a fixed interval for the host event loop.
//! Missed intervals collapse into a single tick.

use std::time::{Duration, Instant};

use crate::router::InputEvent;

pub struct Ticker {
    interval: Duration,
    next: Instant,
    ticks: u64,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
            ticks: 0,
        }
    }

    pub fn from_millis(interval_ms: u64, now: Instant) -> Self {
        Self::new(Duration::from_millis(interval_ms), now)
    }

    /// Yield a tick if the interval has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<InputEvent> {
        if now < self.next {
            return None;
        }
        self.ticks += 1;
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        Some(InputEvent::Tick)
    }

    /// Time left before the next tick is due
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Ticks fired so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
