//! Config command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::FocusError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be serialized or written.
pub fn config(
    paths: &Paths,
    config: &Config,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(config),
            OutputFormat::Pretty => config.to_yaml(),
        },

        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({
                "root": paths.root,
                "config": paths.config_file,
                "database": paths.database,
                "cache": paths.cache,
                "logs": paths.logs,
            })),
            OutputFormat::Pretty => Ok([
                ("Root", &paths.root),
                ("Config", &paths.config_file),
                ("Database", &paths.database),
                ("Cache", &paths.cache),
                ("Logs", &paths.logs),
            ]
            .iter()
            .map(|(label, path)| format!("{:<9} {}", format!("{label}:").dimmed(), path.display()))
            .collect::<Vec<_>>()
            .join("\n")),
        },

        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(FocusError::Config(format!(
                    "{} already exists. Use --force to overwrite.",
                    paths.config_file.display()
                )));
            }

            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            tracing::info!(path = %paths.config_file.display(), "config initialized");

            match format {
                OutputFormat::Json => to_json(&json!({ "written": paths.config_file })),
                OutputFormat::Pretty => Ok(format!(
                    "{} {}",
                    "Wrote".green(),
                    paths.config_file.display()
                )),
            }
        }
    }
}
