//! Timer command implementation.
//!
//! `timer run` drives a [`SessionTimer`] from the system clock until it
//! completes, redrawing a status line every second and sending
//! notifications for completion and break reminders.

use std::io::Write;
use std::time::Duration as StdDuration;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, PresetArg, TimerCommands};
use crate::config::Config;
use crate::core::{format_duration, Clock, SystemClock};
use crate::error::FocusError;
use crate::features::focus::{
    validate_break_reminder_minutes, validate_custom_minutes, DurationPreset, SessionConfig,
    SessionTimer, TickScheduler, TimerEvent, TimerPhase,
};
use crate::features::notify::{notify_event, DesktopNotifier, Notifier};
use crate::output::{format_timer_json, format_timer_pretty, to_json};

/// How often the run loop wakes up.
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(100);

/// Execute timer subcommands.
///
/// # Errors
///
/// Returns an error if the requested lengths are out of range or the
/// terminal cannot be written.
pub fn timer(
    config: &Config,
    cmd: TimerCommands,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match cmd {
        TimerCommands::Run {
            minutes,
            preset,
            break_reminder,
            no_notify,
        } => {
            let session = session_config(config, minutes, preset, break_reminder)?;

            let mut notifier = DesktopNotifier::new(config.timer.notifications && !no_notify);
            let permission = notifier.request_permission();
            tracing::debug!(?permission, "notification permission");

            let clock = SystemClock;
            let mut runner = SessionRunner::new(session, &notifier, &clock);
            let mut stdout = std::io::stdout();
            run_to_completion(&mut runner, &clock, format, &mut stdout, || {
                std::thread::sleep(POLL_INTERVAL);
            })?;

            finished_output(runner.timer(), format)
        }

        TimerCommands::Presets => match format {
            OutputFormat::Json => {
                let presets: Vec<_> = DurationPreset::ALL
                    .iter()
                    .map(|p| json!({ "name": p, "label": p.display_name(), "minutes": p.minutes() }))
                    .collect();
                to_json(&presets)
            }
            OutputFormat::Pretty => Ok(DurationPreset::ALL
                .iter()
                .map(|p| format!("{:<10} {} min", p.display_name().bold(), p.minutes()))
                .collect::<Vec<_>>()
                .join("\n")),
        },
    }
}

/// Work out the session length and break threshold from flags and config.
///
/// Presets skip range validation; anything else must be 1-120 minutes.
///
/// # Errors
///
/// Returns `FocusError::InvalidInput` for out-of-range values.
pub fn session_config(
    config: &Config,
    minutes: Option<u32>,
    preset: Option<PresetArg>,
    break_reminder: Option<u32>,
) -> Result<SessionConfig, FocusError> {
    let duration = match (preset, minutes) {
        (Some(preset), _) => DurationPreset::from(preset).minutes(),
        (None, Some(minutes)) => validate_custom_minutes(minutes)?,
        (None, None) => validate_custom_minutes(config.timer.default_minutes)?,
    };
    let reminder = validate_break_reminder_minutes(
        break_reminder.unwrap_or(config.timer.break_reminder_minutes),
    )?;

    Ok(SessionConfig::from_minutes(duration, reminder))
}

/// A running session: timer, scheduler and the notifier it reports to.
pub struct SessionRunner<'n> {
    timer: SessionTimer,
    scheduler: TickScheduler,
    notifier: &'n dyn Notifier,
}

impl<'n> SessionRunner<'n> {
    /// Create a runner and start the countdown at the clock's current time.
    #[must_use]
    pub fn new(config: SessionConfig, notifier: &'n dyn Notifier, clock: &dyn Clock) -> Self {
        let mut timer = SessionTimer::new(config, clock.now());
        timer.start();
        tracing::info!(seconds = timer.duration_seconds(), "session started");

        // Arm the countdown so the first second lands at now + 1s.
        let mut scheduler = TickScheduler::new(clock.instant());
        scheduler.drive(&mut timer, clock.instant(), clock.now());

        Self {
            timer,
            scheduler,
            notifier,
        }
    }

    /// Advance to the clock's current time. Returns the countdown seconds
    /// applied and the events emitted, which have already been announced.
    pub fn step(&mut self, clock: &dyn Clock) -> (u32, Vec<TimerEvent>) {
        let (batch, events) = self
            .scheduler
            .drive(&mut self.timer, clock.instant(), clock.now());
        for event in &events {
            tracing::info!(?event, "timer event");
            notify_event(self.notifier, *event, self.timer.break_reminder_minutes());
        }
        if self.is_finished() {
            self.scheduler.cancel();
        }
        (batch.seconds, events)
    }

    /// Whether the countdown reached zero.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.timer.phase() == TimerPhase::Completed
    }

    /// The timer being driven.
    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }
}

/// Step the runner until it finishes, writing progress to `out`.
///
/// `wait` is called between steps.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_to_completion<W: Write>(
    runner: &mut SessionRunner<'_>,
    clock: &dyn Clock,
    format: OutputFormat,
    out: &mut W,
    mut wait: impl FnMut(),
) -> Result<(), FocusError> {
    let pretty = format == OutputFormat::Pretty;
    if pretty {
        write!(out, "\r{}", format_timer_pretty(runner.timer()))?;
        out.flush()?;
    }

    while !runner.is_finished() {
        wait();
        let (seconds, events) = runner.step(clock);
        if !pretty {
            continue;
        }

        for event in &events {
            if let TimerEvent::BreakDue { minutes_focused } = event {
                writeln!(
                    out,
                    "\r{}",
                    format!("Break reminder: {minutes_focused} minutes of focus").yellow()
                )?;
            }
        }
        if seconds > 0 || !events.is_empty() {
            write!(out, "\r{}", format_timer_pretty(runner.timer()))?;
            out.flush()?;
        }
    }

    if pretty {
        writeln!(out)?;
    }
    Ok(())
}

fn finished_output(timer: &SessionTimer, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Json => format_timer_json(timer),
        OutputFormat::Pretty => {
            let focused = chrono::Duration::seconds(i64::from(timer.duration_seconds()));
            Ok(format!(
                "{} {} focused. Time for a break.",
                "Session complete!".green().bold(),
                format_duration(focused)
            ))
        }
    }
}
