use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;
use crate::features::focus::DurationPreset;

#[derive(Parser)]
#[command(name = "focus-space")]
#[command(about = "A terminal focus timer with break reminders, ambient audio, todos and notes")]
#[command(long_about = "focus-space - a calm place to get work done

A countdown focus timer with Pomodoro (25 min) and Deep Work (50 min)
presets, periodic break reminders, looping ambient audio, a todo list
and quick notes. Everything is stored locally.

QUICK START:
  focus-space                       Open the full-screen timer
  focus-space timer run -p deep-work
                                    Run a 50 minute session in the terminal
  focus-space todo add \"Write the report\"
  focus-space note add \"Call back at 3\"

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focus-space <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to the
    /// `general.default_output` setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory (config, database, logs)
    #[arg(long, global = true, env = HOME_ENV, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Also write logs to stderr, at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the full-screen focus timer (default)
    ///
    /// Timer, presets, break reminders, ambient audio, todos and notes in
    /// one screen. Press '?' inside for key bindings.
    Tui,

    /// Run a focus session in the terminal
    ///
    /// # Examples
    ///
    ///   focus-space timer run                    Default length from config
    ///   focus-space timer run -p pomodoro        25 minutes
    ///   focus-space timer run -m 45 -b 30        45 minutes, remind every 30
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Manage the todo list
    Todo(TodoArgs),

    /// Manage notes
    #[command(alias = "n")]
    Note(NoteArgs),

    /// Show the current motivational quote
    Quote,

    /// Ambient audio
    Audio(AudioArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: focus-space completions zsh > ~/.zsh/completions/_focus-space
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the timer.
#[derive(Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    pub command: TimerCommands,
}

/// Timer subcommands.
#[derive(Subcommand)]
pub enum TimerCommands {
    /// Count down a session, with notifications
    Run {
        /// Session length in minutes (1-120)
        #[arg(long, short = 'm', conflicts_with = "preset")]
        minutes: Option<u32>,

        /// Use a preset length
        #[arg(long, short = 'p', value_enum)]
        preset: Option<PresetArg>,

        /// Remind to take a break after this many minutes (15-180)
        #[arg(long, short = 'b')]
        break_reminder: Option<u32>,

        /// Do not send desktop notifications
        #[arg(long)]
        no_notify: bool,
    },

    /// List the duration presets
    Presets,
}

/// Preset names on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetArg {
    /// 25 minutes
    Pomodoro,
    /// 50 minutes
    DeepWork,
}

impl From<PresetArg> for DurationPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Pomodoro => Self::Pomodoro,
            PresetArg::DeepWork => Self::DeepWork,
        }
    }
}

/// Arguments for todo commands.
#[derive(Args)]
pub struct TodoArgs {
    #[command(subcommand)]
    pub command: TodoCommands,
}

/// Todo subcommands.
#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a todo
    #[command(alias = "a")]
    Add {
        /// Todo text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List todos in the order they were added
    #[command(alias = "ls")]
    List {
        /// Only show open todos
        #[arg(long)]
        open: bool,
    },

    /// Mark a todo done, or open again
    Toggle {
        /// Todo ID
        id: String,
    },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Todo ID
        id: String,
    },
}

/// Arguments for note commands.
#[derive(Args)]
pub struct NoteArgs {
    #[command(subcommand)]
    pub command: NoteCommands,
}

/// Note subcommands.
#[derive(Subcommand)]
pub enum NoteCommands {
    /// Add a note
    #[command(alias = "a")]
    Add {
        /// Note content
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// List notes, newest first
    #[command(alias = "ls")]
    List {
        /// Show at most this many notes
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: String,
    },
}

/// Arguments for audio commands.
#[derive(Args)]
pub struct AudioArgs {
    #[command(subcommand)]
    pub command: AudioCommands,
}

/// Audio subcommands.
#[derive(Subcommand)]
pub enum AudioCommands {
    /// List built-in tracks and the detected player
    Tracks,
}

/// Arguments for config commands.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the data directory paths
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
