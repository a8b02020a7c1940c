//! Note persistence.

use crate::error::FocusError;
use crate::storage::{Database, NOTES_SLOT};

use super::NoteBook;

/// Loads and saves the note book.
pub struct NoteStore<'db> {
    db: &'db Database,
}

impl<'db> NoteStore<'db> {
    /// Create a store over an open database.
    #[must_use]
    pub const fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Load the notes; empty if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored data is malformed.
    pub fn load(&self) -> Result<NoteBook, FocusError> {
        Ok(NoteBook::from_notes(NOTES_SLOT.load(self.db)?))
    }

    /// Persist all notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, book: &NoteBook) -> Result<(), FocusError> {
        NOTES_SLOT.save(self.db, book.notes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    #[test]
    fn test_empty_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let store = NoteStore::new(&db);

        assert!(store.load().unwrap().is_empty());
        store.save(&NoteBook::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_keeps_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let store = NoteStore::new(&db);

        let start = DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut book = NoteBook::new();
        for i in 0..3 {
            book.add(&format!("note {i}"), start + Duration::minutes(i))
                .unwrap();
        }

        store.save(&book).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, book);
        assert_eq!(loaded.notes()[0].content, "note 2");
        assert_eq!(loaded.notes()[2].content, "note 0");
    }
}
