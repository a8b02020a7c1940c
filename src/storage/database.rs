//! `SQLite` database connection and key-value operations.
//!
//! The database is stored at `~/.focus-space/focus-space.db` and contains a
//! single `local_storage` table of string keys to string values.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Paths;
use crate::error::FocusError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the location described by `paths`.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, FocusError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, FocusError> {
        let conn = Connection::open(path).map_err(|e| {
            FocusError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FocusError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FocusError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), FocusError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FocusError> {
        migrations::get_version(&self.conn)
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, FocusError> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| FocusError::Database(format!("Failed to read {key}: {e}")))
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), FocusError> {
        self.conn
            .execute(
                r"INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| FocusError::Database(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_reopen_keeps_values() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.set_item("focus-todos", "[]").unwrap();
        }

        {
            let db = Database::open_at(&db_path).unwrap();
            assert_eq!(db.get_item("focus-todos").unwrap().as_deref(), Some("[]"));
        }
    }

    #[test]
    fn test_get_missing_item() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_item("nothing-here").unwrap().is_none());
    }

    #[test]
    fn test_set_item_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("k", "one").unwrap();
        db.set_item("k", "two").unwrap();
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("two"));
    }
}
