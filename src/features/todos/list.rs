//! Todo items and the in-memory list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::next_id;
use crate::error::FocusError;

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique id.
    pub id: String,
    /// Task text, trimmed and never empty.
    pub text: String,
    /// Whether the task is done.
    pub completed: bool,
}

/// Todos in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Wrap todos loaded from storage.
    #[must_use]
    pub const fn from_items(items: Vec<Todo>) -> Self {
        Self { items }
    }

    /// Append a new open todo.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidInput` if `text` is blank.
    pub fn add(&mut self, text: &str, now: DateTime<Utc>) -> Result<&Todo, FocusError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FocusError::InvalidInput(
                "todo text cannot be empty".to_string(),
            ));
        }

        let id = next_id(now, self.items.iter().map(|t| t.id.as_str()));
        self.items.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
        });

        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Flip the completed flag of a todo.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::NotFound` if no todo has this id.
    pub fn toggle(&mut self, id: &str) -> Result<&Todo, FocusError> {
        let todo = self
            .items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| FocusError::NotFound(format!("todo {id}")))?;

        todo.completed = !todo.completed;
        Ok(todo)
    }

    /// Remove a todo, returning it.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::NotFound` if no todo has this id.
    pub fn delete(&mut self, id: &str) -> Result<Todo, FocusError> {
        let index = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FocusError::NotFound(format!("todo {id}")))?;

        Ok(self.items.remove(index))
    }

    /// Look up a todo.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    /// All todos in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Number of todos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of completed todos.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Number of open todos.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.len() - self.completed_count()
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
    fn test_add_trims_and_appends() {
        let mut list = TodoList::new();
        list.add("  write report ", epoch()).unwrap();
        list.add("call mom", epoch() + Duration::seconds(1)).unwrap();

        let texts: Vec<_> = list.items().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["write report", "call mom"]);
        assert!(list.items().iter().all(|t| !t.completed));
    }

    #[test]
    fn test_add_blank_is_rejected() {
        let mut list = TodoList::new();
        assert!(matches!(
            list.add("   ", epoch()),
            Err(FocusError::InvalidInput(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_are_unique_within_same_millisecond() {
        let mut list = TodoList::new();
        let a = list.add("a", epoch()).unwrap().id.clone();
        let b = list.add("b", epoch()).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_toggle() {
        let mut list = TodoList::new();
        let id = list.add("a", epoch()).unwrap().id.clone();

        assert!(list.toggle(&id).unwrap().completed);
        assert_eq!(list.completed_count(), 1);
        assert_eq!(list.open_count(), 0);

        assert!(!list.toggle(&id).unwrap().completed);
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut list = TodoList::new();
        assert!(matches!(list.toggle("nope"), Err(FocusError::NotFound(_))));
    }

    #[test]
    fn test_delete_keeps_order_of_others() {
        let mut list = TodoList::new();
        let a = list.add("a", epoch()).unwrap().id.clone();
        let b = list.add("b", epoch()).unwrap().id.clone();
        let c = list.add("c", epoch()).unwrap().id.clone();

        let removed = list.delete(&b).unwrap();
        assert_eq!(removed.text, "b");

        let ids: Vec<_> = list.items().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(list.get(&b).is_none());
        assert!(matches!(list.delete(&b), Err(FocusError::NotFound(_))));
    }
}
