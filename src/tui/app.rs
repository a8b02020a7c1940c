//! Application state for the TUI.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::{Config, Theme};
use crate::core::Clock;
use crate::error::FocusError;
use crate::features::audio::MusicControls;
use crate::features::focus::{
    validate_break_reminder_minutes, validate_custom_minutes, DurationPreset, QuoteRotator,
    SessionConfig, SessionTimer, TickScheduler, TimerEvent,
};
use crate::features::notes::{NoteBook, NoteStore};
use crate::features::notify::{notify_event, Notifier};
use crate::features::todos::{TodoList, TodoStore};
use crate::storage::Database;
use crate::tui::waveform::Waveform;

/// Side panel with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// The todo list.
    Todos,
    /// The notes list.
    Notes,
}

/// What a text prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Custom session length in minutes.
    CustomMinutes,
    /// Break reminder threshold in minutes.
    BreakReminder,
    /// Text of a new todo.
    Todo,
    /// Content of a new note.
    Note,
    /// Path to an audio file.
    AudioFile,
}

impl InputMode {
    /// Prompt label.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::CustomMinutes => "Minutes (1-120)",
            Self::BreakReminder => "Break reminder minutes (15-180)",
            Self::Todo => "New todo",
            Self::Note => "New note",
            Self::AudioFile => "Audio file path",
        }
    }
}

/// An open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// What the prompt is for.
    pub mode: InputMode,
    /// Text typed so far.
    pub buffer: String,
}

/// Application state.
pub struct App<'a> {
    db: &'a Database,
    config_path: PathBuf,
    config: Config,
    /// The session countdown.
    pub timer: SessionTimer,
    scheduler: TickScheduler,
    /// Todos in insertion order.
    pub todos: TodoList,
    /// Notes, newest first.
    pub notes: NoteBook,
    /// Ambient audio.
    pub music: MusicControls,
    notifier: Box<dyn Notifier>,
    /// Current quote.
    pub quote: QuoteRotator,
    /// Bars drawn under the clock.
    pub waveform: Waveform,
    /// Panel with keyboard focus.
    pub panel: Panel,
    /// Selected todo index.
    pub todo_selected: usize,
    /// Selected note index.
    pub note_selected: usize,
    /// Open prompt, if any.
    pub input: Option<Input>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the key help overlay is shown.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create a new app instance, loading todos and notes.
    ///
    /// # Errors
    ///
    /// Returns an error if stored todos or notes cannot be read, or the
    /// configured timer lengths are out of range.
    pub fn new(
        db: &'a Database,
        config_path: &Path,
        config: Config,
        music: MusicControls,
        mut notifier: Box<dyn Notifier>,
        clock: &dyn Clock,
    ) -> Result<Self, FocusError> {
        let now = clock.now();
        let minutes = validate_custom_minutes(config.timer.default_minutes)?;
        let reminder = validate_break_reminder_minutes(config.timer.break_reminder_minutes)?;

        let todos = TodoStore::new(db).load()?;
        let notes = NoteStore::new(db).load()?;

        let permission = notifier.request_permission();
        tracing::debug!(?permission, "notification permission");

        Ok(Self {
            db,
            config_path: config_path.to_path_buf(),
            config,
            timer: SessionTimer::new(SessionConfig::from_minutes(minutes, reminder), now),
            scheduler: TickScheduler::new(clock.instant()),
            todos,
            notes,
            music,
            notifier,
            quote: QuoteRotator::at(now),
            waveform: Waveform::new(),
            panel: Panel::Todos,
            todo_selected: 0,
            note_selected: 0,
            input: None,
            status: Some("Press ? for help".to_string()),
            show_help: false,
            should_quit: false,
        })
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.config.general.theme
    }

    /// Run every cadence that came due on `clock`.
    pub fn tick(&mut self, clock: &dyn Clock) {
        let (batch, events) = self
            .scheduler
            .drive(&mut self.timer, clock.instant(), clock.now());

        for event in events {
            self.announce(event);
        }
        if batch.animation {
            self.waveform
                .frame(self.music.is_playing() && self.timer.is_running());
            self.music.poll();
        }
        if batch.quote {
            self.quote.advance();
        }
    }

    fn announce(&mut self, event: TimerEvent) {
        tracing::info!(?event, "timer event");
        let minutes = self.timer.break_reminder_minutes();
        notify_event(&*self.notifier, event, minutes);

        self.status = Some(match event {
            TimerEvent::SessionComplete => "Session complete! Time for a break.".to_string(),
            TimerEvent::BreakDue { .. } => {
                format!("You've been focused for {minutes} minutes. Press b to take a break.")
            }
        });
    }

    /// Start or pause the countdown.
    pub fn toggle_timer(&mut self) {
        if self.timer.remaining_seconds() == 0 {
            self.status = Some("Session finished. Press r to reset.".to_string());
            return;
        }
        self.timer.toggle();
        self.status = None;
    }

    /// Stop and restore the full duration.
    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.status = Some("Timer reset".to_string());
    }

    /// Switch to a preset length. Ignored while running.
    pub fn select_preset(&mut self, preset: DurationPreset) {
        self.status = Some(if self.timer.set_preset(preset) {
            format!("{preset} selected")
        } else {
            "Pause the timer to change its length".to_string()
        });
    }

    /// Record a break: clears the reminder and pauses the session.
    pub fn take_break(&mut self, now: DateTime<Utc>) {
        self.timer.take_break(now);
        self.status = Some("Enjoy your break".to_string());
    }

    /// Open a prompt.
    pub fn begin_input(&mut self, mode: InputMode) {
        self.input = Some(Input {
            mode,
            buffer: String::new(),
        });
        self.status = None;
    }

    /// Append a character to the prompt.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.push(c);
        }
    }

    /// Remove the last character from the prompt.
    pub fn input_backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    /// Close the prompt without doing anything.
    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Apply the prompt's text.
    ///
    /// Rejected input keeps the prompt closed and only sets a status message.
    ///
    /// # Errors
    ///
    /// Returns an error only if saving a todo or note fails.
    pub fn submit_input(&mut self, now: DateTime<Utc>) -> Result<(), FocusError> {
        let Some(input) = self.input.take() else {
            return Ok(());
        };
        let text = input.buffer.trim();

        match input.mode {
            InputMode::CustomMinutes => self.apply_custom_minutes(text),
            InputMode::BreakReminder => self.apply_break_reminder(text),
            InputMode::Todo => self.add_todo(text, now)?,
            InputMode::Note => self.add_note(text, now)?,
            InputMode::AudioFile => self.load_audio_file(text),
        }
        Ok(())
    }

    fn apply_custom_minutes(&mut self, text: &str) {
        let parsed = text
            .parse::<u32>()
            .map_err(|_| FocusError::InvalidInput(format!("not a number: {text}")))
            .and_then(validate_custom_minutes);

        self.status = Some(match parsed {
            Ok(minutes) if self.timer.set_duration(minutes) => format!("Timer set to {minutes} minutes"),
            Ok(_) => "Pause the timer to change its length".to_string(),
            Err(e) => e.to_string(),
        });
    }

    fn apply_break_reminder(&mut self, text: &str) {
        let parsed = text
            .parse::<u32>()
            .map_err(|_| FocusError::InvalidInput(format!("not a number: {text}")))
            .and_then(validate_break_reminder_minutes);

        self.status = Some(match parsed {
            Ok(minutes) if self.timer.set_break_reminder(minutes) => {
                format!("Break reminder every {minutes} minutes")
            }
            Ok(_) => "Pause the timer to change the break reminder".to_string(),
            Err(e) => e.to_string(),
        });
    }

    fn load_audio_file(&mut self, text: &str) {
        self.status = Some(match self.music.load_custom_file(Path::new(text)) {
            Ok(()) => "Custom track loaded".to_string(),
            Err(e) => e.to_string(),
        });
    }

    /// Add a todo and save the list. Blank text only sets a status message.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn add_todo(&mut self, text: &str, now: DateTime<Utc>) -> Result<(), FocusError> {
        match self.todos.add(text, now) {
            Ok(_) => {
                TodoStore::new(self.db).save(&self.todos)?;
                self.todo_selected = self.todos.len() - 1;
                self.panel = Panel::Todos;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
        Ok(())
    }

    /// Flip the selected todo.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn toggle_selected_todo(&mut self) -> Result<(), FocusError> {
        let Some(id) = self.todos.items().get(self.todo_selected).map(|t| t.id.clone()) else {
            return Ok(());
        };
        self.todos.toggle(&id)?;
        TodoStore::new(self.db).save(&self.todos)
    }

    /// Delete the selected todo.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn delete_selected_todo(&mut self) -> Result<(), FocusError> {
        let Some(id) = self.todos.items().get(self.todo_selected).map(|t| t.id.clone()) else {
            return Ok(());
        };
        let removed = self.todos.delete(&id)?;
        TodoStore::new(self.db).save(&self.todos)?;
        self.todo_selected = clamp_selection(self.todo_selected, self.todos.len());
        self.status = Some(format!("Deleted: {}", removed.text));
        Ok(())
    }

    /// Add a note at the top and save. Blank content only sets a status message.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn add_note(&mut self, content: &str, now: DateTime<Utc>) -> Result<(), FocusError> {
        match self.notes.add(content, now) {
            Ok(_) => {
                NoteStore::new(self.db).save(&self.notes)?;
                self.note_selected = 0;
                self.panel = Panel::Notes;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
        Ok(())
    }

    /// Delete the selected note.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn delete_selected_note(&mut self) -> Result<(), FocusError> {
        let Some(id) = self.notes.notes().get(self.note_selected).map(|n| n.id.clone()) else {
            return Ok(());
        };
        self.notes.delete(&id)?;
        NoteStore::new(self.db).save(&self.notes)?;
        self.note_selected = clamp_selection(self.note_selected, self.notes.len());
        self.status = Some("Note deleted".to_string());
        Ok(())
    }

    /// Delete the selected item in the focused panel.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn delete_selected(&mut self) -> Result<(), FocusError> {
        match self.panel {
            Panel::Todos => self.delete_selected_todo(),
            Panel::Notes => self.delete_selected_note(),
        }
    }

    /// Move focus to the other panel.
    pub fn switch_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Todos => Panel::Notes,
            Panel::Notes => Panel::Todos,
        };
    }

    /// Move selection down in the focused panel.
    pub fn select_next(&mut self) {
        let (selected, len) = self.selection_mut();
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    /// Move selection up in the focused panel.
    pub fn select_previous(&mut self) {
        let (selected, _) = self.selection_mut();
        *selected = selected.saturating_sub(1);
    }

    fn selection_mut(&mut self) -> (&mut usize, usize) {
        match self.panel {
            Panel::Todos => (&mut self.todo_selected, self.todos.len()),
            Panel::Notes => (&mut self.note_selected, self.notes.len()),
        }
    }

    /// Switch between dark and light, saving the choice.
    pub fn toggle_theme(&mut self) {
        self.config.general.theme = self.config.general.theme.toggled();
        let theme = self.config.general.theme;

        self.status = Some(match self.config.save_to_path(&self.config_path) {
            Ok(()) => format!("Theme: {theme}"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save theme");
                format!("Theme: {theme} (not saved)")
            }
        });
    }

    /// Stop every cadence and the audio player.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.music.shutdown();
        tracing::debug!("tui shut down");
    }
}

fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AudioConfig;
    use crate::core::ManualClock;
    use crate::features::audio::MockAudioBackend;
    use crate::features::focus::TimerPhase;
    use crate::features::notify::{MockNotifier, NullNotifier, Permission};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn music(dir: &TempDir) -> MusicControls {
        let mut backend = MockAudioBackend::new();
        backend.expect_stop().return_const(());
        backend.expect_play().returning(|_, _| Ok(()));
        backend.expect_poll().returning(|| Ok(()));
        backend.expect_is_playing().return_const(false);
        MusicControls::new(
            Box::new(backend),
            dir.path().join("cache"),
            &AudioConfig::default(),
        )
    }

    fn app<'a>(db: &'a Database, dir: &TempDir, notifier: Box<dyn Notifier>) -> App<'a> {
        App::new(
            db,
            &dir.path().join("config.yaml"),
            Config::default(),
            music(dir),
            notifier,
            &ManualClock::new(epoch()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let app = app(&db, &dir, Box::new(NullNotifier));

        assert_eq!(app.timer.remaining_seconds(), 1500);
        assert_eq!(app.timer.break_reminder_minutes(), 60);
        assert_eq!(app.timer.phase(), TimerPhase::Idle);
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn test_completion_notifies() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_request_permission()
            .times(1)
            .return_const(Permission::Granted);
        notifier.expect_permission().return_const(Permission::Granted);
        notifier
            .expect_notify()
            .withf(|n| n.title == "Focus Timer Complete!")
            .times(1)
            .returning(|_| Ok(()));

        let mut app = app(&db, &dir, Box::new(notifier));
        app.select_preset(DurationPreset::Pomodoro);
        app.begin_input(InputMode::CustomMinutes);
        for c in "1".chars() {
            app.input_char(c);
        }
        app.submit_input(epoch()).unwrap();
        assert_eq!(app.timer.duration_seconds(), 60);

        let clock = ManualClock::new(epoch());
        app.toggle_timer();
        app.tick(&clock);
        clock.advance(Duration::seconds(60));
        app.tick(&clock);

        assert_eq!(app.timer.phase(), TimerPhase::Completed);
        assert!(app.status.as_deref().unwrap_or_default().contains("complete"));
    }

    #[test]
    fn test_invalid_custom_minutes_leave_timer_alone() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));

        for text in ["0", "121", "abc", ""] {
            app.begin_input(InputMode::CustomMinutes);
            for c in text.chars() {
                app.input_char(c);
            }
            app.submit_input(epoch()).unwrap();
            assert_eq!(app.timer.duration_seconds(), 1500);
            assert!(app.status.is_some());
        }
    }

    #[test]
    fn test_preset_ignored_while_running() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));

        app.toggle_timer();
        app.select_preset(DurationPreset::DeepWork);
        assert_eq!(app.timer.duration_seconds(), 1500);

        app.toggle_timer();
        app.select_preset(DurationPreset::DeepWork);
        assert_eq!(app.timer.duration_seconds(), 3000);
    }

    #[test]
    fn test_break_reminder_and_take_break() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));

        app.begin_input(InputMode::BreakReminder);
        app.input_char('1');
        app.input_char('5');
        app.submit_input(epoch()).unwrap();
        assert_eq!(app.timer.break_reminder_minutes(), 15);

        app.select_preset(DurationPreset::DeepWork);
        app.toggle_timer();
        let clock = ManualClock::new(epoch());
        app.tick(&clock);
        for _ in 0..(15 * 60) {
            clock.advance(Duration::seconds(1));
            app.tick(&clock);
        }
        assert!(app.timer.is_break_due());

        app.take_break(clock.now());
        assert!(!app.timer.is_break_due());
        assert!(!app.timer.is_running());
        assert_eq!(app.timer.last_break_at(), clock.now());
    }

    #[test]
    fn test_todos_persist() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));

        app.add_todo("write", epoch()).unwrap();
        app.add_todo("read", epoch()).unwrap();
        app.add_todo("   ", epoch()).unwrap();
        assert_eq!(app.todos.len(), 2);
        assert_eq!(app.todo_selected, 1);

        app.toggle_selected_todo().unwrap();
        app.select_previous();
        app.delete_selected().unwrap();

        let stored = TodoStore::new(&db).load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.items()[0].text, "read");
        assert!(stored.items()[0].completed);
        assert_eq!(app.todo_selected, 0);
    }

    #[test]
    fn test_notes_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));

        app.add_note("first", epoch()).unwrap();
        app.add_note("second", epoch() + Duration::minutes(1)).unwrap();
        assert_eq!(app.panel, Panel::Notes);

        let stored = NoteStore::new(&db).load().unwrap();
        assert_eq!(stored.notes()[0].content, "second");

        app.delete_selected().unwrap();
        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes.notes()[0].content, "first");
    }

    #[test]
    fn test_panel_navigation() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));
        app.add_todo("a", epoch()).unwrap();
        app.add_todo("b", epoch()).unwrap();
        app.todo_selected = 0;

        app.select_next();
        app.select_next();
        assert_eq!(app.todo_selected, 1);

        app.switch_panel();
        assert_eq!(app.panel, Panel::Notes);
        app.select_next();
        assert_eq!(app.note_selected, 0);
    }

    #[test]
    fn test_theme_toggle_is_saved() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));

        app.toggle_theme();
        assert_eq!(app.theme(), Theme::Light);

        let saved = Config::load_from_path(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(saved.general.theme, Theme::Light);
    }

    #[test]
    fn test_quote_rotates_and_shutdown_cancels() {
        let db = Database::open_in_memory().unwrap();
        let dir = TempDir::new().unwrap();
        let mut app = app(&db, &dir, Box::new(NullNotifier));
        let first = app.quote.index();
        let clock = ManualClock::new(epoch());

        clock.advance(Duration::seconds(180));
        app.tick(&clock);
        assert_ne!(app.quote.index(), first);

        app.shutdown();
        app.toggle_timer();
        clock.advance(Duration::minutes(10));
        app.tick(&clock);
        assert_eq!(app.timer.remaining_seconds(), 1500);
    }
}
