//! Monotonic clock and fixed-rate ticker driving periodic repaints

use crate::decay::Millis;
use std::time::{Duration, Instant};

/// Milliseconds elapsed since the clock was created
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self { origin: Instant::now() }
    }

    pub fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Fixed-interval tick source. Stopped tickers never fire.
pub struct Ticker {
    interval: Millis,
    next_due: Option<Millis>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: (interval.as_millis() as Millis).max(1),
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Millis) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume a due tick.
    ///
    /// After a stall longer than one interval a single tick fires and the
    /// schedule is re-anchored on `now`; missed ticks are not replayed.
    pub fn poll(&mut self, now: Millis) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Time left until the next tick, `None` when stopped
    pub fn timeout(&self, now: Millis) -> Option<Duration> {
        self.next_due
            .map(|due| Duration::from_millis(due.saturating_sub(now)))
    }
}
