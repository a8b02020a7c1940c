//! Shared traits.
//!
//! The clock is the seam between real time and everything that schedules
//! or timestamps: the TUI loop and CLI commands read the [`SystemClock`],
//! tests drive a [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};

/// Source of the current time.
///
/// Two readings: wall-clock time for anything stored or shown, and a
/// monotonic instant for measuring intervals.
pub trait Clock {
    /// The current wall-clock instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current monotonic instant.
    fn instant(&self) -> Instant;
}

/// The operating system clocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
    origin: Instant,
    elapsed: Cell<std::time::Duration>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
            origin: Instant::now(),
            elapsed: Cell::new(std::time::Duration::ZERO),
        }
    }

    /// Let `by` pass. Both readings move; negative steps only move the wall clock.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
        if let Ok(step) = by.to_std() {
            self.elapsed.set(self.elapsed.get() + step);
        }
    }

    /// Reset the wall clock to `at`, leaving the monotonic reading alone.
    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn instant(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}
