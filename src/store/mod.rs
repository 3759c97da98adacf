//! Local movie store
//!
//! All tracking state (watchlist, watch history, custom lists) lives in a
//! single SQLite database. Catalog rows are cached here whenever a movie is
//! saved, so every local command works offline.

pub mod lists;
pub mod movies;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use lists::{CustomList, ListSummary};
#[allow(unused_imports)]
pub use movies::Movie;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Database wrapper owning the SQLite connection
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        Self::from_connection(conn)
    }

    /// Open an in-memory database (tests)
    #[allow(dead_code)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // WAL keeps concurrent readers happy; foreign keys enforce the
        // list-entry cascade.
        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to enable WAL mode")?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .context("Failed to enable foreign keys")?;

        conn.execute_batch(SCHEMA)
            .context("Failed to initialize schema")?;

        Ok(Self { conn })
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    overview TEXT NOT NULL,
    poster_path TEXT,
    release_date TEXT,
    in_watchlist INTEGER NOT NULL DEFAULT 0,
    is_watched INTEGER NOT NULL DEFAULT 0,
    user_rating REAL,
    watched_at INTEGER,
    runtime_minutes INTEGER,
    vote_average REAL
);

CREATE INDEX IF NOT EXISTS idx_movies_watched_at ON movies(watched_at);

CREATE TABLE IF NOT EXISTS custom_lists (
    list_id INTEGER PRIMARY KEY AUTOINCREMENT,
    list_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS movie_list_entries (
    list_id INTEGER NOT NULL REFERENCES custom_lists(list_id) ON DELETE CASCADE,
    movie_id INTEGER NOT NULL,
    PRIMARY KEY (list_id, movie_id)
);

CREATE INDEX IF NOT EXISTS idx_movie_list_entries_movie_id
    ON movie_list_entries(movie_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.db");

        let db = Database::open(&path).unwrap();
        assert!(path.exists());

        // Schema is idempotent: reopening must not fail
        drop(db);
        Database::open(&path).unwrap();
    }

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
