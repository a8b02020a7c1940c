//! Quote and completions commands.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::features::focus::QuoteRotator;
use crate::features::shell::{completion_install_instructions, generate_completions, shell_from_str};
use crate::output::to_json;

/// Show the quote for `now`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn quote(now: DateTime<Utc>, format: OutputFormat) -> Result<String, FocusError> {
    let rotator = QuoteRotator::at(now);
    match format {
        OutputFormat::Json => to_json(&json!({
            "index": rotator.index(),
            "quote": rotator.current(),
        })),
        OutputFormat::Pretty => Ok(format!("\"{}\"", rotator.current()).italic().to_string()),
    }
}

/// Print a completion script or its install instructions.
///
/// # Errors
///
/// Returns an error for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, FocusError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        FocusError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}
