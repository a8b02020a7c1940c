//! JSON output formatting for focus-space.

use serde::Serialize;
use serde_json::json;

use crate::error::FocusError;
use crate::features::focus::SessionTimer;
use crate::features::notes::Note;
use crate::features::todos::Todo;

/// Format todos as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_todos_json(todos: &[Todo], list_name: &str) -> Result<String, FocusError> {
    let completed = todos.iter().filter(|t| t.completed).count();
    let output = json!({
        "list": list_name,
        "count": todos.len(),
        "completed": completed,
        "items": todos
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format notes as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_notes_json(notes: &[Note]) -> Result<String, FocusError> {
    let output = json!({
        "count": notes.len(),
        "items": notes
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the timer state as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_timer_json(timer: &SessionTimer) -> Result<String, FocusError> {
    let output = json!({
        "phase": timer.phase(),
        "remainingSeconds": timer.remaining_seconds(),
        "durationSeconds": timer.duration_seconds(),
        "progress": timer.progress(),
        "breakReminderMinutes": timer.break_reminder_minutes(),
        "breakDue": timer.is_break_due(),
        "preset": timer.active_preset(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(value)?)
}
