//! Periodic tick sources for the session timer.
//!
//! The event loop calls [`TickScheduler::poll`] as often as it likes; the
//! scheduler works out which cadences came due since the last poll:
//! - the 1 second countdown tick
//! - the 60 second break check
//! - the 100 ms animation frame
//! - the 180 second quote rotation
//!
//! Cadences are measured on the monotonic clock, so wall-clock corrections
//! never skip or stall the countdown.
//!
//! The countdown and break-check cadences only run while the timer runs.
//! When the timer stops they are disarmed, and the next start re-arms them a
//! full interval later.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::timer::{SessionTimer, TimerEvent};

/// Countdown tick interval.
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
/// Break check interval.
pub const BREAK_CHECK_INTERVAL: Duration = Duration::from_secs(60);
/// Waveform animation interval.
pub const ANIMATION_INTERVAL: Duration = Duration::from_millis(100);
/// Quote rotation interval.
pub const QUOTE_INTERVAL: Duration = Duration::from_secs(180);

/// A single repeating interval.
#[derive(Debug, Clone)]
struct Cadence {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Cadence {
    const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    fn arm(&mut self, at: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(at + self.interval);
        }
    }

    fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Number of whole intervals that elapsed, advancing the deadline past them.
    fn fire_count(&mut self, at: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut count = 0u32;
        while due <= at {
            count = count.saturating_add(1);
            due += self.interval;
        }
        self.next_due = Some(due);
        count
    }
}

/// What came due in one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickBatch {
    /// Countdown seconds that elapsed.
    pub seconds: u32,
    /// A break check is due.
    pub break_check: bool,
    /// An animation frame is due.
    pub animation: bool,
    /// The quote should rotate.
    pub quote: bool,
}

impl TickBatch {
    /// Whether anything came due.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.seconds == 0 && !self.break_check && !self.animation && !self.quote
    }
}

/// Drives the session timer from a stream of monotonic readings.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    countdown: Cadence,
    break_check: Cadence,
    animation: Cadence,
    quote: Cadence,
    cancelled: bool,
}

impl TickScheduler {
    /// Create a scheduler. Free-running cadences start counting from `at`.
    #[must_use]
    pub fn new(at: Instant) -> Self {
        let mut animation = Cadence::new(ANIMATION_INTERVAL);
        let mut quote = Cadence::new(QUOTE_INTERVAL);
        animation.arm(at);
        quote.arm(at);

        Self {
            countdown: Cadence::new(COUNTDOWN_INTERVAL),
            break_check: Cadence::new(BREAK_CHECK_INTERVAL),
            animation,
            quote,
            cancelled: false,
        }
    }

    /// Work out which cadences came due by `at`.
    ///
    /// `running` is the timer's running flag at the time of the poll.
    pub fn poll(&mut self, at: Instant, running: bool) -> TickBatch {
        if self.cancelled {
            return TickBatch::default();
        }

        let (seconds, break_check) = if running {
            self.countdown.arm(at);
            self.break_check.arm(at);
            (
                self.countdown.fire_count(at),
                self.break_check.fire_count(at) > 0,
            )
        } else {
            self.countdown.disarm();
            self.break_check.disarm();
            (0, false)
        };

        TickBatch {
            seconds,
            break_check,
            animation: self.animation.fire_count(at) > 0,
            quote: self.quote.fire_count(at) > 0,
        }
    }

    /// Feed a batch into the timer, returning the events it emitted.
    ///
    /// `now` is the wall-clock time the break check measures against.
    /// Countdown seconds stop being applied as soon as the timer stops, so a
    /// lagging loop never counts past completion.
    pub fn apply(
        &mut self,
        batch: TickBatch,
        timer: &mut SessionTimer,
        now: DateTime<Utc>,
    ) -> Vec<TimerEvent> {
        let mut events = Vec::new();

        for _ in 0..batch.seconds {
            if !timer.is_running() {
                break;
            }
            if let Some(event) = timer.tick() {
                events.push(event);
            }
        }

        if batch.break_check && timer.is_running() {
            if let Some(event) = timer.check_break_due(now) {
                events.push(event);
            }
        }

        if !timer.is_running() {
            self.countdown.disarm();
            self.break_check.disarm();
        }

        events
    }

    /// Poll at `at` and apply with wall-clock `now` in one step.
    pub fn drive(
        &mut self,
        timer: &mut SessionTimer,
        at: Instant,
        now: DateTime<Utc>,
    ) -> (TickBatch, Vec<TimerEvent>) {
        let batch = self.poll(at, timer.is_running());
        let events = self.apply(batch, timer, now);
        (batch, events)
    }

    /// Stop every cadence for good.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.countdown.disarm();
        self.break_check.disarm();
        self.animation.disarm();
        self.quote.disarm();
    }

    /// Whether [`cancel`](Self::cancel) was called.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
