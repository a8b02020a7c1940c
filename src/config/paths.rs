//! Path resolution for focus-space configuration and data files.
//!
//! All data is stored in `~/.focus-space/` (or `$FOCUS_SPACE_HOME`):
//! - `config.yaml` - Main configuration file
//! - `focus-space.db` - SQLite database holding todos and notes
//! - `cache/` - Generated audio tracks
//! - `logs/` - Rolling log files

use std::path::{Path, PathBuf};

use crate::error::FocusError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "FOCUS_SPACE_HOME";

/// Paths to focus-space configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focus-space/`
    pub root: PathBuf,
    /// Config file: `~/.focus-space/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focus-space/focus-space.db`
    pub database: PathBuf,
    /// Cache directory: `~/.focus-space/cache/`
    pub cache: PathBuf,
    /// Log directory: `~/.focus-space/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FocusError> {
        let home = std::env::var("HOME").map_err(|_| {
            FocusError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focus-space")))
    }

    /// Resolve paths from an explicit root, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<&Path>) -> Result<Self, FocusError> {
        match root {
            Some(root) => Ok(Self::with_root(root.to_path_buf())),
            None => Self::new(),
        }
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focus-space.db"),
            cache: root.join("cache"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusError> {
        let dirs = [&self.root, &self.cache, &self.logs];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FocusError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".focus-space")))
    }
}
