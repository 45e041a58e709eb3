use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Test clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Start of a timed session and its deadline
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started_at: Instant,
    limit: Duration,
}

impl SessionClock {
    pub fn start<C: Clock + ?Sized>(clock: &C, limit: Duration) -> Self {
        Self {
            started_at: clock.now(),
            limit,
        }
    }

    pub fn elapsed<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        clock.now().saturating_duration_since(self.started_at)
    }

    /// Elapsed time, never more than the limit
    pub fn capped_elapsed<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        self.elapsed(clock).min(self.limit)
    }

    pub fn timed_out<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        self.elapsed(clock) >= self.limit
    }
}
