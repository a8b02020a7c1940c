//! focus-space - a terminal focus timer
//!
//! A countdown session timer with presets and break reminders, looping
//! ambient audio, desktop notifications, and a locally stored todo list and
//! notes. Usable as a full-screen TUI or through CLI subcommands.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusError;
pub use features::focus::{SessionConfig, SessionTimer, TickScheduler, TimerEvent, TimerPhase};
