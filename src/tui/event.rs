//! Event handling for the TUI.

use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::FocusError;
use crate::features::focus::DurationPreset;
use crate::tui::app::{App, InputMode, Panel};

/// How long to wait for input before the next tick.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Key bindings shown by '?'.
pub const HELP: &str = "space:start/pause r:reset 1/2:presets c:custom B:break-reminder b:take-break \
m:music n/p:track +/-:volume M:mute u:audio-file Tab:panel a:add j/k:move x:toggle d:delete \
N:note T:theme q:quit";

/// Wait up to [`POLL_TIMEOUT`] for a key and apply it.
///
/// # Errors
///
/// Returns an error if reading the terminal fails or saving fails.
pub fn handle_events(app: &mut App<'_>, now: DateTime<Utc>) -> Result<(), FocusError> {
    if event::poll(POLL_TIMEOUT)
        .map_err(|e| FocusError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) =
            event::read().map_err(|e| FocusError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key, now)?;
            }
        }
    }
    Ok(())
}

/// Apply one key press.
///
/// # Errors
///
/// Returns an error if saving a todo or note fails.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent, now: DateTime<Utc>) -> Result<(), FocusError> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Enter => app.submit_input(now)?,
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        }
        return Ok(());
    }

    if app.show_help {
        app.show_help = false;
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Timer
        KeyCode::Char(' ' | 's') => app.toggle_timer(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Char('1') => app.select_preset(DurationPreset::Pomodoro),
        KeyCode::Char('2') => app.select_preset(DurationPreset::DeepWork),
        KeyCode::Char('c') => app.begin_input(InputMode::CustomMinutes),
        KeyCode::Char('B') => app.begin_input(InputMode::BreakReminder),
        KeyCode::Char('b') => app.take_break(now),

        // Music
        KeyCode::Char('m') => app.music.toggle_play(),
        KeyCode::Char('n') => app.music.next_track(),
        KeyCode::Char('p') => app.music.previous_track(),
        KeyCode::Char('M') => app.music.toggle_mute(),
        KeyCode::Char('+' | '=') => app.music.adjust_volume(0.1),
        KeyCode::Char('-') => app.music.adjust_volume(-0.1),
        KeyCode::Char('u') => app.begin_input(InputMode::AudioFile),

        // Lists
        KeyCode::Tab => app.switch_panel(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('a') => app.begin_input(match app.panel {
            Panel::Todos => InputMode::Todo,
            Panel::Notes => InputMode::Note,
        }),
        KeyCode::Char('N') => app.begin_input(InputMode::Note),
        KeyCode::Char('x') | KeyCode::Enter if app.panel == Panel::Todos => {
            app.toggle_selected_todo()?;
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected()?,

        KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }

    Ok(())
}
