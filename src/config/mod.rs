//! Configuration management for focus-space.
//!
//! This module handles loading and saving configuration from `~/.focus-space/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{AudioConfig, Config, GeneralConfig, Theme, TimerConfig};
