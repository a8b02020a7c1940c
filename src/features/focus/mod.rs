//! Focus timer.
//!
//! Provides the countdown session with break reminders:
//! - Start/pause/reset with preset and custom durations
//! - Break reminders after a configurable stretch of focus
//! - The tick scheduler that drives both from the event loop
//! - Rotating motivational quotes

pub mod quotes;
pub mod scheduler;
pub mod timer;

pub use quotes::{QuoteRotator, QUOTES};
pub use scheduler::{TickBatch, TickScheduler};
pub use timer::{
    render_progress_bar, validate_break_reminder_minutes, validate_custom_minutes,
    DurationPreset, SessionConfig, SessionTimer, TimerEvent, TimerPhase,
};
