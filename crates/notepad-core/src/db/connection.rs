//! Database connection management

use crate::error::Result;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::migrations;

/// Wrapper around the `SQLite` connection holding the notes table
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;

        let database = Self {
            conn,
            path: Some(path),
        };
        database.configure()?;
        database.migrate()?;
        tracing::info!("Opened note database at {}", database.describe());
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let database = Self { conn, path: None };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Configure `SQLite` pragmas and register the search function
    fn configure(&self) -> Result<()> {
        if self.path.is_some() {
            if let Err(err) = self
                .conn
                .query_row("PRAGMA journal_mode = WAL;", [], |_| Ok(()))
            {
                tracing::warn!(
                    "Could not enable WAL for {}: {err}; using the default journal",
                    self.describe()
                );
            }
        }
        self.conn.execute_batch(
            "PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;
        self.conn.busy_timeout(Duration::from_secs(5))?;

        self.conn.create_scalar_function(
            "contains_ci",
            2,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let haystack = ctx.get::<String>(0)?;
                let needle = ctx.get::<String>(1)?;
                Ok(contains_ignore_case(&haystack, &needle))
            },
        )?;
        Ok(())
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Counter that changes whenever another connection commits to this file
    pub fn data_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))?)
    }

    /// Filesystem path, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, flushing pending writes
    pub fn close(self) -> Result<()> {
        let description = self.describe();
        self.conn.close().map_err(|(_, error)| error)?;
        tracing::info!("Closed note database at {description}");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| ":memory:".to_string(), |path| path.display().to_string())
    }
}

/// Unicode-aware, case-insensitive substring test
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.path().is_none());
    }

    #[test]
    fn test_open_file_and_reopen() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("notes.db");

        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.path(), Some(db_path.as_path()));
        db.connection()
            .execute(
                "INSERT INTO notes (title, created_at, updated_at) VALUES ('kept', 1, 1)",
                [],
            )
            .unwrap();
        db.close().unwrap();

        let reopened = Database::open(&db_path).unwrap();
        let title: String = reopened
            .connection()
            .query_row("SELECT title FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(title, "kept");
    }

    #[test]
    fn test_file_database_uses_wal() {
        let tmp = tempdir().unwrap();
        let db = Database::open(tmp.path().join("notes.db")).unwrap();

        let mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_data_version_tracks_other_connections() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("notes.db");

        let watcher = Database::open(&db_path).unwrap();
        let writer = Database::open(&db_path).unwrap();
        let before = watcher.data_version().unwrap();

        watcher
            .connection()
            .execute(
                "INSERT INTO notes (title, created_at, updated_at) VALUES ('own', 1, 1)",
                [],
            )
            .unwrap();
        assert_eq!(watcher.data_version().unwrap(), before);

        writer
            .connection()
            .execute(
                "INSERT INTO notes (title, created_at, updated_at) VALUES ('other', 1, 1)",
                [],
            )
            .unwrap();
        assert_ne!(watcher.data_version().unwrap(), before);
    }

    #[test]
    fn test_contains_ci_function() {
        let db = Database::open_in_memory().unwrap();
        let matched: bool = db
            .connection()
            .query_row("SELECT contains_ci('Meeting Notes', 'meeting')", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(matched);
    }

    #[test]
    fn test_contains_ignore_case_handles_unicode() {
        assert!(contains_ignore_case("ÄRGER im Büro", "ärger"));
        assert!(contains_ignore_case("买菜清单", "菜"));
        assert!(!contains_ignore_case("hello", "world"));
        assert!(contains_ignore_case("anything", ""));
    }
}
