//! Feature implementations for focus-space.
//!
//! - Session timer, tick scheduler and quotes
//! - Todo list and notes
//! - Ambient audio
//! - Desktop notifications
//! - Shell completions

pub mod audio;
pub mod focus;
pub mod notes;
pub mod notify;
pub mod shell;
pub mod todos;
