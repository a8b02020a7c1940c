//! Notes and the newest-first note book.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{format_note_timestamp, next_id};
use crate::error::FocusError;

/// A note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique id.
    pub id: String,
    /// Note body, trimmed and never empty.
    pub content: String,
    /// When the note was written.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creation time formatted for display.
    #[must_use]
    pub fn display_date(&self) -> String {
        format_note_timestamp(self.created_at)
    }
}

/// Notes ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    /// Create an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Wrap notes loaded from storage, already newest first.
    #[must_use]
    pub const fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Insert a note at the front.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidInput` if `content` is blank.
    pub fn add(&mut self, content: &str, now: DateTime<Utc>) -> Result<&Note, FocusError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(FocusError::InvalidInput(
                "note content cannot be empty".to_string(),
            ));
        }

        let id = next_id(now, self.notes.iter().map(|n| n.id.as_str()));
        self.notes.insert(
            0,
            Note {
                id,
                content: content.to_string(),
                created_at: now,
            },
        );

        Ok(&self.notes[0])
    }

    /// Remove a note, returning it.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::NotFound` if no note has this id.
    pub fn delete(&mut self, id: &str) -> Result<Note, FocusError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| FocusError::NotFound(format!("note {id}")))?;

        Ok(self.notes.remove(index))
    }

    /// Notes, newest first.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_add_puts_newest_first() {
        let mut book = NoteBook::new();
        book.add("first", epoch()).unwrap();
        book.add("second", epoch() + Duration::minutes(1)).unwrap();

        let contents: Vec<_> = book.notes().iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }

    #[test]
    fn test_add_trims_and_stamps() {
        let mut book = NoteBook::new();
        let note = book.add("\n remember the milk \n", epoch()).unwrap();
        assert_eq!(note.content, "remember the milk");
        assert_eq!(note.created_at, epoch());
        assert_eq!(note.id, epoch().timestamp_millis().to_string());
    }

    #[test]
    fn test_add_blank_is_rejected() {
        let mut book = NoteBook::new();
        assert!(book.add("", epoch()).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_delete() {
        let mut book = NoteBook::new();
        let id = book.add("a", epoch()).unwrap().id.clone();
        book.add("b", epoch() + Duration::seconds(1)).unwrap();

        assert_eq!(book.delete(&id).unwrap().content, "a");
        assert_eq!(book.len(), 1);
        assert!(matches!(book.delete(&id), Err(FocusError::NotFound(_))));
    }

    #[test]
    fn test_serializes_created_at_in_camel_case() {
        let mut book = NoteBook::new();
        book.add("x", epoch()).unwrap();
        let json = serde_json::to_string(book.notes()).unwrap();
        assert!(json.contains("\"createdAt\""));
    }
}
