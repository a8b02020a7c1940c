//! The to-do list.
//!
//! Todos keep their insertion order and are persisted to the
//! `focus-todos` slot after every change.

mod list;
mod store;

pub use list::{Todo, TodoList};
pub use store::TodoStore;
