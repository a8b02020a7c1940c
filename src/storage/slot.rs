//! Typed JSON collections stored in the key-value table.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FocusError;
use crate::features::notes::Note;
use crate::features::todos::Todo;

use super::Database;

/// Slot holding the todo list.
pub const TODOS_SLOT: Slot<Todo> = Slot::new("focus-todos");
/// Slot holding the notes, newest first.
pub const NOTES_SLOT: Slot<Note> = Slot::new("focus-notes");

/// A key in local storage holding a JSON array of `T`.
#[derive(Debug)]
pub struct Slot<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> Slot<T> {
    /// Create a slot for `key`.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// The storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }
}

impl<T: Serialize + DeserializeOwned> Slot<T> {
    /// Load the collection. A missing key yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored JSON is malformed.
    pub fn load(&self, db: &Database) -> Result<Vec<T>, FocusError> {
        match db.get_item(self.key)? {
            Some(raw) => {
                let items: Vec<T> = serde_json::from_str(&raw)?;
                tracing::debug!(key = self.key, count = items.len(), "slot loaded");
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, db: &Database, items: &[T]) -> Result<(), FocusError> {
        let raw = serde_json::to_string(items)?;
        db.set_item(self.key, &raw)?;
        tracing::debug!(key = self.key, count = items.len(), "slot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Item {
        id: String,
        label: String,
    }

    const ITEMS: Slot<Item> = Slot::new("test-items");

    #[test]
    fn test_missing_key_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(ITEMS.load(&db).unwrap().is_empty());
    }

    #[test]
    fn test_save_empty_then_load() {
        let db = Database::open_in_memory().unwrap();
        ITEMS.save(&db, &[]).unwrap();
        assert!(ITEMS.load(&db).unwrap().is_empty());
        assert_eq!(db.get_item("test-items").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let db = Database::open_in_memory().unwrap();
        let items: Vec<Item> = (0..5)
            .map(|i| Item {
                id: format!("{i}"),
                label: format!("item {i}"),
            })
            .rev()
            .collect();

        ITEMS.save(&db, &items).unwrap();
        assert_eq!(ITEMS.load(&db).unwrap(), items);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("test-items", "{not json").unwrap();
        assert!(matches!(ITEMS.load(&db), Err(FocusError::Parse(_))));
    }

    #[test]
    fn test_slot_keys() {
        assert_eq!(TODOS_SLOT.key(), "focus-todos");
        assert_eq!(NOTES_SLOT.key(), "focus-notes");
    }
}
