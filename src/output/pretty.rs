use colored::Colorize;

use crate::core::format_mmss;
use crate::features::focus::{render_progress_bar, SessionTimer, TimerPhase};
use crate::features::notes::Note;
use crate::features::todos::Todo;

const RULE_WIDTH: usize = 60;

fn todo_icon(todo: &Todo) -> colored::ColoredString {
    if todo.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    }
}

/// Format a list of todos as a pretty table
pub fn format_todos_pretty(todos: &[Todo], title: &str) -> String {
    if todos.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let done = todos.iter().filter(|t| t.completed).count();
    let mut output = format!("{title} ({done}/{} done)\n", todos.len());
    output.push_str(&"─".repeat(RULE_WIDTH));
    output.push('\n');

    for todo in todos {
        let text = if todo.completed {
            todo.text.strikethrough().dimmed().to_string()
        } else {
            todo.text.bold().to_string()
        };
        output.push_str(&format!("{} {}  {}\n", todo_icon(todo), text, todo.id.dimmed()));
    }

    output
}

/// Format a single todo as pretty output
pub fn format_todo_pretty(todo: &Todo) -> String {
    let mut output = format!("{} {}\n", todo_icon(todo), todo.text.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), todo.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Status".dimmed(),
        if todo.completed { "Done" } else { "Open" }
    ));
    output
}

/// Format notes, newest first
pub fn format_notes_pretty(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "Notes (0)\n  No notes yet".to_string();
    }

    let mut output = format!("Notes ({})\n", notes.len());
    output.push_str(&"─".repeat(RULE_WIDTH));
    output.push('\n');

    for note in notes {
        output.push_str(&format!(
            "{}  {}\n",
            note.display_date().yellow(),
            note.id.dimmed()
        ));
        for line in note.content.lines() {
            output.push_str(&format!("  {line}\n"));
        }
    }

    output
}

/// Format a single note as pretty output
pub fn format_note_pretty(note: &Note) -> String {
    let mut output = format!("{}\n", note.content.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), note.id));
    output.push_str(&format!("  {}: {}\n", "Created".dimmed(), note.display_date()));
    output
}

/// One-line timer status: phase, clock, progress bar.
pub fn format_timer_pretty(timer: &SessionTimer) -> String {
    let phase = match timer.phase() {
        TimerPhase::Idle => "Idle".white(),
        TimerPhase::Running => "Focusing".green(),
        TimerPhase::Paused => "Paused".yellow(),
        TimerPhase::Completed => "Complete".cyan(),
    };

    let mut line = format!(
        "{:<9} {}  {}",
        phase.bold(),
        format_mmss(timer.remaining_seconds()).bold(),
        render_progress_bar(timer.progress(), 30)
    );

    if timer.is_break_due() {
        line.push_str(&format!("  {}", "Break due".red().bold()));
    }
    line
}
