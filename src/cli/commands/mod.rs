//! Command implementations for focus-space.
//!
//! Each command returns the text to print; `main` decides where it goes.

mod audio;
mod config;
mod misc;
mod note;
mod timer;
mod todo;

pub use audio::audio;
pub use config::config;
pub use misc::{completions, quote};
pub use note::note;
pub use timer::{run_to_completion, session_config, timer, SessionRunner};
pub use todo::todo;
