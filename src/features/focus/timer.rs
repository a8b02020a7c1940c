//! The session timer state machine.
//!
//! A [`SessionTimer`] owns the countdown, the running flag and the break
//! reminder threshold. It never reads the clock itself: the countdown is
//! driven by [`SessionTimer::tick`] once per elapsed second, and the break
//! check receives `now` from its caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FocusError;

/// Shortest custom session, in minutes.
pub const MIN_CUSTOM_MINUTES: u32 = 1;
/// Longest custom session, in minutes.
pub const MAX_CUSTOM_MINUTES: u32 = 120;
/// Shortest accepted break reminder threshold, in minutes.
pub const MIN_BREAK_REMINDER_MINUTES: u32 = 15;
/// Longest accepted break reminder threshold, in minutes.
pub const MAX_BREAK_REMINDER_MINUTES: u32 = 180;
/// Default break reminder threshold, in minutes.
pub const DEFAULT_BREAK_REMINDER_MINUTES: u32 = 60;

/// Preset session lengths. Presets bypass custom range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationPreset {
    /// 25 minutes.
    Pomodoro,
    /// 50 minutes.
    DeepWork,
}

impl DurationPreset {
    /// All presets, in display order.
    pub const ALL: [Self; 2] = [Self::Pomodoro, Self::DeepWork];

    /// Length of the preset in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Pomodoro => 25,
            Self::DeepWork => 50,
        }
    }

    /// Parse a preset name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pomodoro" | "pomo" | "p" | "25" | "25m" => Some(Self::Pomodoro),
            "deep-work" | "deep" | "d" | "50" | "50m" => Some(Self::DeepWork),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pomodoro => "Pomodoro",
            Self::DeepWork => "Deep Work",
        }
    }
}

impl std::fmt::Display for DurationPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}min)", self.display_name(), self.minutes())
    }
}

/// Check a custom session length typed by the user.
///
/// # Errors
///
/// Returns `FocusError::InvalidInput` unless `minutes` is within 1-120.
pub fn validate_custom_minutes(minutes: u32) -> Result<u32, FocusError> {
    if (MIN_CUSTOM_MINUTES..=MAX_CUSTOM_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(FocusError::InvalidInput(format!(
            "custom duration must be between {MIN_CUSTOM_MINUTES} and {MAX_CUSTOM_MINUTES} minutes, got {minutes}"
        )))
    }
}

/// Check a break reminder threshold typed by the user.
///
/// # Errors
///
/// Returns `FocusError::InvalidInput` unless `minutes` is within 15-180.
pub fn validate_break_reminder_minutes(minutes: u32) -> Result<u32, FocusError> {
    if (MIN_BREAK_REMINDER_MINUTES..=MAX_BREAK_REMINDER_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(FocusError::InvalidInput(format!(
            "break reminder must be between {MIN_BREAK_REMINDER_MINUTES} and {MAX_BREAK_REMINDER_MINUTES} minutes, got {minutes}"
        )))
    }
}

/// Timer configuration. Only changes while the timer is not running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session length in seconds. Always positive.
    pub duration_seconds: u32,
    /// Minutes of focus after which a break is due. Always positive.
    pub break_reminder_minutes: u32,
}

impl SessionConfig {
    /// Build a configuration from minutes. Zero values are raised to one.
    #[must_use]
    pub fn from_minutes(duration_minutes: u32, break_reminder_minutes: u32) -> Self {
        Self {
            duration_seconds: duration_minutes.max(1).saturating_mul(60),
            break_reminder_minutes: break_reminder_minutes.max(1),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_minutes(
            DurationPreset::Pomodoro.minutes(),
            DEFAULT_BREAK_REMINDER_MINUTES,
        )
    }
}

/// Observable phase of the timer, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Not running, full duration remaining.
    Idle,
    /// Counting down.
    Running,
    /// Stopped part-way through.
    Paused,
    /// Reached zero.
    Completed,
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Signals emitted by the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown reached zero.
    SessionComplete,
    /// Focus time since the last break reached the reminder threshold.
    BreakDue {
        /// Whole minutes since the last break.
        minutes_focused: i64,
    },
}

/// The countdown and break-reminder state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    config: SessionConfig,
    remaining_seconds: u32,
    running: bool,
    last_break_at: DateTime<Utc>,
    break_due: bool,
}

impl SessionTimer {
    /// Create an idle timer. `now` seeds the last-break instant.
    #[must_use]
    pub const fn new(config: SessionConfig, now: DateTime<Utc>) -> Self {
        Self {
            remaining_seconds: config.duration_seconds,
            config,
            running: false,
            last_break_at: now,
            break_due: false,
        }
    }

    /// Set the session length. No-op while running or for zero minutes.
    ///
    /// Returns true if the change was applied.
    pub fn set_duration(&mut self, minutes: u32) -> bool {
        if self.running {
            tracing::debug!(minutes, "timer is running, ignoring duration change");
            return false;
        }
        if minutes == 0 {
            return false;
        }

        self.config.duration_seconds = minutes.saturating_mul(60);
        self.remaining_seconds = self.config.duration_seconds;
        tracing::debug!(minutes, "session duration set");
        true
    }

    /// Apply a preset length. No-op while running.
    pub fn set_preset(&mut self, preset: DurationPreset) -> bool {
        self.set_duration(preset.minutes())
    }

    /// Set the break reminder threshold. No-op while running or for zero.
    ///
    /// Returns true if the change was applied.
    pub fn set_break_reminder(&mut self, minutes: u32) -> bool {
        if self.running || minutes == 0 {
            return false;
        }
        self.config.break_reminder_minutes = minutes;
        true
    }

    /// Start or resume the countdown.
    ///
    /// Returns true if the timer was not already running. A completed timer
    /// must be reset before it can start again.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Pause the countdown. Returns true if the timer was running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Start if stopped, pause if running.
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(TimerEvent::SessionComplete)` on the tick that reaches
    /// zero. Does nothing unless running.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.running = false;
            tracing::info!(
                duration_seconds = self.config.duration_seconds,
                "focus session complete"
            );
            Some(TimerEvent::SessionComplete)
        } else {
            None
        }
    }

    /// Stop and restore the full duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.config.duration_seconds;
    }

    /// Whole minutes elapsed since the last break.
    #[must_use]
    pub fn minutes_since_break(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.last_break_at).num_minutes()
    }

    /// Check whether a break is due.
    ///
    /// Once the threshold is reached every call signals again until
    /// [`take_break`](Self::take_break) is called.
    pub fn check_break_due(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        let minutes_focused = self.minutes_since_break(now);
        if minutes_focused >= i64::from(self.config.break_reminder_minutes) {
            self.break_due = true;
            tracing::info!(minutes_focused, "break due");
            Some(TimerEvent::BreakDue { minutes_focused })
        } else {
            None
        }
    }

    /// Record a break: restart the focus clock, clear the signal and pause.
    pub fn take_break(&mut self, now: DateTime<Utc>) {
        self.last_break_at = now;
        self.break_due = false;
        self.running = false;
        tracing::debug!("break taken");
    }

    /// Fraction of the session already elapsed, 0.0 to 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.config.duration_seconds);
        if total == 0.0 {
            return 1.0;
        }
        f64::from(self.config.duration_seconds - self.remaining_seconds) / total
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.remaining_seconds == 0 {
            TimerPhase::Completed
        } else if self.remaining_seconds == self.config.duration_seconds {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    /// Seconds left in the session.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Session length in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.config.duration_seconds
    }

    /// Break reminder threshold in minutes.
    #[must_use]
    pub const fn break_reminder_minutes(&self) -> u32 {
        self.config.break_reminder_minutes
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Check if the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Check if a break reminder is pending.
    #[must_use]
    pub const fn is_break_due(&self) -> bool {
        self.break_due
    }

    /// When the last break was taken (or the timer created).
    #[must_use]
    pub const fn last_break_at(&self) -> DateTime<Utc> {
        self.last_break_at
    }

    /// The preset matching the current duration, if any.
    #[must_use]
    pub fn active_preset(&self) -> Option<DurationPreset> {
        DurationPreset::ALL
            .into_iter()
            .find(|p| p.minutes().saturating_mul(60) == self.config.duration_seconds)
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn timer(minutes: u32) -> SessionTimer {
        SessionTimer::new(
            SessionConfig::from_minutes(minutes, DEFAULT_BREAK_REMINDER_MINUTES),
            epoch(),
        )
    }

    #[test]
    fn test_new_timer_is_idle() {
        let t = timer(25);
        assert_eq!(t.phase(), TimerPhase::Idle);
        assert_eq!(t.remaining_seconds(), 1500);
        assert!(!t.is_running());
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn test_set_duration_for_all_valid_minutes() {
        for minutes in MIN_CUSTOM_MINUTES..=MAX_CUSTOM_MINUTES {
            let mut t = timer(25);
            assert!(t.set_duration(minutes));
            assert_eq!(t.remaining_seconds(), minutes * 60);
            assert_eq!(t.duration_seconds(), minutes * 60);
            assert_eq!(t.progress(), 0.0);
            assert_eq!(t.phase(), TimerPhase::Idle);
        }
    }

    #[test]
    fn test_set_duration_while_running_is_noop() {
        let mut t = timer(25);
        t.start();
        assert!(!t.set_duration(50));
        assert_eq!(t.remaining_seconds(), 1500);
        assert_eq!(t.duration_seconds(), 1500);
    }

    #[test]
    fn test_set_duration_zero_is_noop() {
        let mut t = timer(25);
        assert!(!t.set_duration(0));
        assert_eq!(t.duration_seconds(), 1500);
    }

    #[test]
    fn test_set_duration_while_paused_replaces_remaining() {
        let mut t = timer(25);
        t.start();
        t.tick();
        t.pause();
        assert!(t.set_duration(50));
        assert_eq!(t.remaining_seconds(), 3000);
        assert_eq!(t.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_presets_bypass_custom_range() {
        let mut t = timer(10);
        assert!(t.set_preset(DurationPreset::DeepWork));
        assert_eq!(t.remaining_seconds(), 3000);
        assert_eq!(t.active_preset(), Some(DurationPreset::DeepWork));

        t.set_duration(7);
        assert_eq!(t.active_preset(), None);
    }

    #[test]
    fn test_start_pause_are_idempotent() {
        let mut t = timer(25);
        assert!(t.start());
        assert!(!t.start());
        assert!(t.is_running());

        assert!(t.pause());
        assert!(!t.pause());
        assert!(!t.is_running());
    }

    #[test]
    fn test_toggle() {
        let mut t = timer(25);
        t.toggle();
        assert!(t.is_running());
        t.toggle();
        assert!(!t.is_running());
    }

    #[test]
    fn test_tick_runs_to_completion_exactly_once() {
        let mut t = timer(1);
        t.start();

        let mut completions = 0;
        for _ in 0..t.duration_seconds() {
            if t.tick() == Some(TimerEvent::SessionComplete) {
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(t.remaining_seconds(), 0);
        assert!(!t.is_running());
        assert_eq!(t.phase(), TimerPhase::Completed);
        assert_eq!(t.progress(), 1.0);

        assert_eq!(t.tick(), None);
        assert_eq!(t.remaining_seconds(), 0);
        assert_eq!(t.phase(), TimerPhase::Completed);
    }

    #[test]
    fn test_tick_when_not_running_is_noop() {
        let mut t = timer(25);
        assert_eq!(t.tick(), None);
        assert_eq!(t.remaining_seconds(), 1500);
    }

    #[test]
    fn test_completed_timer_cannot_start() {
        let mut t = timer(1);
        t.start();
        for _ in 0..60 {
            t.tick();
        }
        assert!(!t.start());
        assert_eq!(t.phase(), TimerPhase::Completed);
    }

    #[test]
    fn test_pause_mid_session() {
        let mut t = timer(25);
        t.start();
        for _ in 0..10 {
            t.tick();
        }
        t.pause();
        assert_eq!(t.phase(), TimerPhase::Paused);
        assert_eq!(t.remaining_seconds(), 1490);
    }

    #[test]
    fn test_reset_from_any_state() {
        // Running
        let mut t = timer(25);
        t.start();
        t.tick();
        t.reset();
        assert_eq!(t.remaining_seconds(), 1500);
        assert!(!t.is_running());
        assert_eq!(t.phase(), TimerPhase::Idle);

        // Completed
        let mut t = timer(1);
        t.start();
        for _ in 0..60 {
            t.tick();
        }
        t.reset();
        assert_eq!(t.remaining_seconds(), 60);
        assert_eq!(t.phase(), TimerPhase::Idle);

        // Idle
        let mut t = timer(5);
        t.reset();
        assert_eq!(t.remaining_seconds(), 300);
    }

    #[test]
    fn test_progress_midway() {
        let mut t = SessionTimer::new(SessionConfig::from_minutes(2, 60), epoch());
        t.start();
        for _ in 0..60 {
            t.tick();
        }
        assert!((t.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_break_due_threshold() {
        let mut t = timer(25);
        t.start();

        assert_eq!(t.check_break_due(epoch() + Duration::minutes(59)), None);
        assert!(!t.is_break_due());

        assert_eq!(
            t.check_break_due(epoch() + Duration::minutes(61)),
            Some(TimerEvent::BreakDue { minutes_focused: 61 })
        );
        assert!(t.is_break_due());
    }

    #[test]
    fn test_break_due_at_exact_threshold() {
        let mut t = timer(25);
        assert!(t.check_break_due(epoch() + Duration::minutes(60)).is_some());
    }

    #[test]
    fn test_break_due_repeats_until_taken() {
        let mut t = timer(25);
        t.start();
        assert!(t.check_break_due(epoch() + Duration::minutes(60)).is_some());
        assert!(t.check_break_due(epoch() + Duration::minutes(61)).is_some());
        assert!(t.check_break_due(epoch() + Duration::minutes(62)).is_some());
        assert!(t.is_break_due());
    }

    #[test]
    fn test_take_break_resets_elapsed_and_pauses() {
        let mut t = timer(25);
        t.start();
        let now = epoch() + Duration::minutes(61);
        assert!(t.check_break_due(now).is_some());

        t.take_break(now);
        assert!(!t.is_break_due());
        assert!(!t.is_running());
        assert_eq!(t.minutes_since_break(now), 0);
        assert_eq!(t.last_break_at(), now);
        assert_eq!(t.check_break_due(now + Duration::minutes(59)), None);
    }

    #[test]
    fn test_set_break_reminder() {
        let mut t = timer(25);
        assert!(t.set_break_reminder(30));
        assert_eq!(t.break_reminder_minutes(), 30);
        assert!(t.check_break_due(epoch() + Duration::minutes(30)).is_some());

        t.start();
        assert!(!t.set_break_reminder(90));
        assert_eq!(t.break_reminder_minutes(), 30);
    }

    #[test]
    fn test_validate_custom_minutes() {
        assert_eq!(validate_custom_minutes(1).unwrap(), 1);
        assert_eq!(validate_custom_minutes(120).unwrap(), 120);
        assert!(validate_custom_minutes(0).is_err());
        assert!(validate_custom_minutes(121).is_err());
    }

    #[test]
    fn test_validate_break_reminder_minutes() {
        assert!(validate_break_reminder_minutes(15).is_ok());
        assert!(validate_break_reminder_minutes(180).is_ok());
        assert!(validate_break_reminder_minutes(14).is_err());
        assert!(validate_break_reminder_minutes(181).is_err());
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(DurationPreset::parse("pomodoro"), Some(DurationPreset::Pomodoro));
        assert_eq!(DurationPreset::parse("50m"), Some(DurationPreset::DeepWork));
        assert_eq!(DurationPreset::parse("deep"), Some(DurationPreset::DeepWork));
        assert_eq!(DurationPreset::parse("lunch"), None);
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
    }
}
