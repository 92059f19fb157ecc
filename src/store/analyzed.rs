//! SQLite-backed set of matches that were already reported

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::util::time::now_rfc3339;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS analyzed_matches (
  match_id TEXT PRIMARY KEY,
  analyzed_at TEXT NOT NULL
);
";

/// Dedup store keyed by match ID
pub struct AnalyzedMatchStore {
    conn: Mutex<Connection>,
}

impl AnalyzedMatchStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(Path::new(":memory:"))
    }

    /// Create the schema if it does not exist yet
    pub fn migrate(&self) -> Result<(), StoreError> {
        self.conn.lock().execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn contains(&self, match_id: &str) -> Result<bool, StoreError> {
        let found = self
            .conn
            .lock()
            .query_row(
                "SELECT 1 FROM analyzed_matches WHERE match_id = ?1",
                params![match_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Insert if absent; returns true when the row is new
    pub fn record(&self, match_id: &str) -> Result<bool, StoreError> {
        let inserted = self.conn.lock().execute(
            "INSERT OR IGNORE INTO analyzed_matches (match_id, analyzed_at) VALUES (?1, ?2)",
            params![match_id, now_rfc3339()],
        )?;
        debug!(match_id, inserted = inserted > 0, "recorded analyzed match");
        Ok(inserted > 0)
    }

    pub fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self.conn.lock().query_row(
            "SELECT COUNT(*) FROM analyzed_matches",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// Dedup store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
