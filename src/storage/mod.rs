//! Storage layer for focus-space.
//!
//! This module provides SQLite-backed local storage:
//! - A key-value table mirroring browser local storage
//! - Typed JSON slots holding the todo and note collections

mod database;
mod migrations;
mod slot;

pub use database::Database;
pub use slot::{Slot, NOTES_SLOT, TODOS_SLOT};
