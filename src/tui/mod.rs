//! Terminal User Interface (TUI) for focus-space.
//!
//! The full-screen timer: countdown, presets, break reminders, ambient
//! audio, todos and notes. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;
mod waveform;

pub use app::{App, Input, InputMode, Panel};
pub use waveform::Waveform;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::{Config, Paths};
use crate::core::{Clock, SystemClock};
use crate::error::FocusError;
use crate::features::audio::{MusicControls, ProcessBackend};
use crate::features::notify::DesktopNotifier;
use crate::storage::Database;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(db: &Database, paths: &Paths, config: Config) -> Result<(), FocusError> {
    let music = MusicControls::new(
        Box::new(ProcessBackend::detect(config.audio.player.as_deref())),
        paths.cache.clone(),
        &config.audio,
    );
    let notifier = Box::new(DesktopNotifier::new(config.timer.notifications));
    let clock = SystemClock;
    let mut app = App::new(db, &paths.config_file, config, music, notifier, &clock)?;

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            app.shutdown();
            return Err(e);
        }
    };

    tracing::info!("tui started");
    let result = run_app(&mut terminal, &mut app, &clock);
    app.shutdown();

    restore_screen(terminal.backend_mut());
    terminal.show_cursor().ok();

    result
}

/// Enter raw mode and the alternate screen. Raw mode is switched back off
/// if anything after it fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, FocusError> {
    enable_raw_mode().map_err(|e| FocusError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    undo_on_error(enter_alternate_screen, || restore_screen(&mut io::stdout()))
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>, FocusError> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocusError::Terminal(format!("Failed to setup terminal: {e}")))?;

    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| FocusError::Terminal(format!("Failed to create terminal: {e}")))
}

/// Run `step`, running `undo` before handing back its error.
fn undo_on_error<T>(
    step: impl FnOnce() -> Result<T, FocusError>,
    undo: impl FnOnce(),
) -> Result<T, FocusError> {
    step().inspect_err(|_| undo())
}

/// Leave raw mode and the alternate screen. Safe to call after a partial setup.
fn restore_screen<W: io::Write>(out: &mut W) {
    disable_raw_mode().ok();
    execute!(out, LeaveAlternateScreen).ok();
}

/// Run the main application loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
    clock: &dyn Clock,
) -> Result<(), FocusError> {
    while !app.should_quit {
        app.tick(clock);

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusError::Terminal(format!("Failed to draw: {e}")))?;

        event::handle_events(app, clock.now())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_screen_setup_runs_undo() {
        let undone = Cell::new(false);
        let result: Result<(), FocusError> = undo_on_error(
            || Err(FocusError::Terminal("no alternate screen".to_string())),
            || undone.set(true),
        );

        assert!(matches!(result, Err(FocusError::Terminal(_))));
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_skips_undo() {
        let undone = Cell::new(false);
        let result = undo_on_error(|| Ok(7), || undone.set(true));

        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }
}
