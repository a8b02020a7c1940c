//! Todo command implementation.

use colored::Colorize;

use crate::cli::args::{OutputFormat, TodoCommands};
use crate::core::Clock;
use crate::error::FocusError;
use crate::features::todos::TodoStore;
use crate::output::{format_todo, format_todo_pretty, format_todos, to_json};
use crate::storage::Database;

/// Execute todo subcommands.
///
/// # Errors
///
/// Returns an error if the input is rejected, the id is unknown, or the
/// database cannot be read or written.
pub fn todo(
    db: &Database,
    clock: &dyn Clock,
    cmd: TodoCommands,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let store = TodoStore::new(db);
    let mut list = store.load()?;

    match cmd {
        TodoCommands::Add { text } => {
            let todo = list.add(&text.join(" "), clock.now())?.clone();
            store.save(&list)?;
            tracing::info!(id = %todo.id, "todo added");
            match format {
                OutputFormat::Json => to_json(&todo),
                OutputFormat::Pretty => Ok(format!(
                    "{}\n{}",
                    "Todo added".green(),
                    format_todo_pretty(&todo)
                )),
            }
        }

        TodoCommands::List { open } => {
            if open {
                let items: Vec<_> = list.items().iter().filter(|t| !t.completed).cloned().collect();
                format_todos(&items, "Open todos", format)
            } else {
                format_todos(list.items(), "Todos", format)
            }
        }

        TodoCommands::Toggle { id } => {
            let todo = list.toggle(&id)?.clone();
            store.save(&list)?;
            tracing::info!(id = %todo.id, completed = todo.completed, "todo toggled");
            format_todo(&todo, format)
        }

        TodoCommands::Delete { id } => {
            let todo = list.delete(&id)?;
            store.save(&list)?;
            tracing::info!(id = %todo.id, "todo deleted");
            match format {
                OutputFormat::Json => to_json(&todo),
                OutputFormat::Pretty => Ok(format!("{} {}", "Deleted:".red(), todo.text)),
            }
        }
    }
}
