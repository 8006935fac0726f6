//! Shared handle to the single SQLite database file.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Connection to the local database file. Cheap to clone; all repositories
/// created from the same connection share one underlying handle.
///
/// The first open creates the schema if it is absent, so opening is
/// idempotent and there is no separate migration step.
#[derive(Debug, Clone)]
pub struct DbConnection {
    conn: Arc<Mutex<Connection>>,
}

impl DbConnection {
    /// Open (creating if necessary) the database file at `path` and ensure
    /// the schema exists.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let db = DbConnection {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        info!(path = %path.as_ref().display(), "opened database");
        Ok(db)
    }

    /// Private in-memory database. Handy for tests that do not care about
    /// the file on disk.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = DbConnection {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Lock the underlying connection. The store is accessed by a single
    /// thread in practice, so contention never happens; a poisoned lock is
    /// recovered rather than propagated.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn initialize(&self) -> Result<()> {
        // The CHECK constraint is the schema-level guarantee that only the
        // two known transaction types can ever be stored.
        self.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('Income', 'Expense'))
            );
            CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                target_amount REAL NOT NULL,
                current_amount REAL NOT NULL DEFAULT 0,
                deadline TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}
