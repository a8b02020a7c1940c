//! Error types for focus-space.

use thiserror::Error;

/// Errors produced by the focus-space library.
#[derive(Debug, Error)]
pub enum FocusError {
    /// Configuration file or data directory problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local database failure.
    #[error("Database error: {0}")]
    Database(String),

    /// An item with the given id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Audio playback failure.
    #[error("Audio error: {0}")]
    Audio(String),

    /// Desktop notification failure.
    #[error("Notification error: {0}")]
    Notification(String),

    /// Terminal setup or drawing failure.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON (de)serialization failure.
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
