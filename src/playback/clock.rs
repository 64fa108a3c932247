//! Time sources and the one-shot playback timer
//!
//! Playback never sleeps or spawns anything. The host loop asks the
//! controller whether its [`Timer`] is due, using whatever [`Clock`] the
//! controller was built with. Tests use [`ManualClock`] to step time by hand.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock backed monotonic time
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A single pending tick.
///
/// Holding a `Timer` is holding the right to tick; dropping it cancels the
/// tick. A controller keeps at most one, in an `Option`, so two pending
/// ticks for the same controller cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    interval: Duration,
    deadline: Duration,
}

impl Timer {
    /// Arm a timer that fires one `interval` after `now`
    pub fn arm(now: Duration, interval: Duration) -> Self {
        Timer {
            interval,
            deadline: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.deadline
    }

    /// Time left before the deadline, zero once due
    pub fn remaining(&self, now: Duration) -> Duration {
        self.deadline.saturating_sub(now)
    }

    /// Re-arm after a fire. The next deadline follows the previous one so
    /// the cadence does not drift; missed fires are skipped, not replayed.
    pub fn rearm_after_fire(&mut self, now: Duration) {
        self.deadline += self.interval;
        if self.deadline <= now {
            self.deadline = now + self.interval;
        }
    }
}
