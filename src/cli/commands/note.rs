//! Note command implementation.

use colored::Colorize;

use crate::cli::args::{NoteCommands, OutputFormat};
use crate::core::Clock;
use crate::error::FocusError;
use crate::features::notes::NoteStore;
use crate::output::{format_note, format_notes, to_json};
use crate::storage::Database;

/// Execute note subcommands.
///
/// # Errors
///
/// Returns an error if the input is rejected, the id is unknown, or the
/// database cannot be read or written.
pub fn note(
    db: &Database,
    clock: &dyn Clock,
    cmd: NoteCommands,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let store = NoteStore::new(db);
    let mut book = store.load()?;

    match cmd {
        NoteCommands::Add { content } => {
            let note = book.add(&content.join(" "), clock.now())?.clone();
            store.save(&book)?;
            tracing::info!(id = %note.id, "note added");
            format_note(&note, format)
        }

        NoteCommands::List { limit } => {
            let notes = book.notes();
            let shown = limit.map_or(notes, |n| &notes[..n.min(notes.len())]);
            format_notes(shown, format)
        }

        NoteCommands::Delete { id } => {
            let note = book.delete(&id)?;
            store.save(&book)?;
            tracing::info!(id = %note.id, "note deleted");
            match format {
                OutputFormat::Json => to_json(&note),
                OutputFormat::Pretty => Ok(format!("{} note {}", "Deleted".red(), note.id)),
            }
        }
    }
}
