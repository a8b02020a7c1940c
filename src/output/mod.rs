//! Output formatting for focus-space.
//!
//! Formatters for printing todos, notes and timer state as colored text or
//! JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::features::focus::SessionTimer;
use crate::features::notes::Note;
use crate::features::todos::Todo;

pub use json::*;
pub use pretty::*;

/// Format todos based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_todos(todos: &[Todo], title: &str, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_todos_pretty(todos, title)),
        OutputFormat::Json => format_todos_json(todos, title),
    }
}

/// Format a single todo based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_todo(todo: &Todo, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_todo_pretty(todo)),
        OutputFormat::Json => to_json(todo),
    }
}

/// Format notes based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_notes(notes: &[Note], format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_notes_pretty(notes)),
        OutputFormat::Json => format_notes_json(notes),
    }
}

/// Format a single note based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_note(note: &Note, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_note_pretty(note)),
        OutputFormat::Json => to_json(note),
    }
}

/// Format the timer state based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_timer(timer: &SessionTimer, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_timer_pretty(timer)),
        OutputFormat::Json => format_timer_json(timer),
    }
}
