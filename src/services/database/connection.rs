use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// Thin wrapper around the application's SQLite connection.
pub struct Database {
    conn: Connection,
    path: String,
}

impl Database {
    /// Opens (or creates) a SQLite database at the provided path and
    /// enables foreign keys immediately.
    ///
    /// # Examples
    /// ```
    /// use coach_scheduler::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Provides read/write access to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Creates tables and runs migrations.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().unwrap();

        let db = Database::new(db_path_str).expect("Should create file-based database");
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
        assert_eq!(db.path(), db_path_str);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::new(":memory:").unwrap();

        let enabled: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1, "Foreign keys should be enabled");
    }

    #[test]
    fn test_schema_creates_tables() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        for table in ["coaches", "slots"] {
            let count: i64 = db
                .connection()
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} table should exist", table);
        }
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        assert!(db.initialize_schema().is_ok());
    }
}
