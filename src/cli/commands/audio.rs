//! Audio command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AudioCommands, OutputFormat};
use crate::config::Config;
use crate::error::FocusError;
use crate::features::audio::{PlayerProgram, AMBIENT_TRACKS, AUDIO_EXTENSIONS};
use crate::output::to_json;

/// Execute audio subcommands.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn audio(config: &Config, cmd: AudioCommands, format: OutputFormat) -> Result<String, FocusError> {
    match cmd {
        AudioCommands::Tracks => {
            let player = PlayerProgram::detect(config.audio.player.as_deref());
            tracks_output(player.as_ref(), format)
        }
    }
}

fn tracks_output(player: Option<&PlayerProgram>, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Json => {
            let tracks: Vec<_> = AMBIENT_TRACKS.iter().map(|t| t.name).collect();
            to_json(&json!({
                "tracks": tracks,
                "customExtensions": AUDIO_EXTENSIONS,
                "player": player.map(|p| p.path.display().to_string()),
            }))
        }
        OutputFormat::Pretty => {
            let mut lines = vec!["Tracks".bold().to_string()];
            lines.extend(AMBIENT_TRACKS.iter().map(|t| format!("  {}", t.name)));
            lines.push(format!(
                "  {} ({})",
                "Custom file".dimmed(),
                AUDIO_EXTENSIONS.join(", ")
            ));
            lines.push(String::new());
            lines.push(match player {
                Some(p) => format!("{} {}", "Player:".dimmed(), p.path.display()),
                None => format!(
                    "{} {}",
                    "Player:".dimmed(),
                    "none found (install mpv or ffplay)".yellow()
                ),
            });
            Ok(lines.join("\n"))
        }
    }
}
