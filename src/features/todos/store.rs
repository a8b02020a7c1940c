//! Todo persistence.

use crate::error::FocusError;
use crate::storage::{Database, TODOS_SLOT};

use super::TodoList;

/// Loads and saves the todo list.
pub struct TodoStore<'db> {
    db: &'db Database,
}

impl<'db> TodoStore<'db> {
    /// Create a store over an open database.
    #[must_use]
    pub const fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Load the list; empty if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored data is malformed.
    pub fn load(&self) -> Result<TodoList, FocusError> {
        Ok(TodoList::from_items(TODOS_SLOT.load(self.db)?))
    }

    /// Persist the whole list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, list: &TodoList) -> Result<(), FocusError> {
        TODOS_SLOT.save(self.db, list.items())
    }
}
