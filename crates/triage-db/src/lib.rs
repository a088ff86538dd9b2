//! # triage-db
//!
//! libSQL storage for Triage tasks.
//!
//! One local file, one table (`tasks`). Every store operation is a single
//! statement; nothing spans calls, so there are no explicit transactions.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

use error::DatabaseError;
use libsql::Builder;

/// Handle to the task database file.
///
/// Wraps a libSQL database and the connection every statement runs on.
/// `":memory:"` databases only live as long as this connection, so it is
/// opened once and held.
pub struct TaskDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TaskDb {
    /// Open (or create) a local database at `path`.
    ///
    /// Creates the `tasks` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be opened or the schema
    /// cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let task_db = Self { db, conn };
        task_db.run_migrations().await?;
        tracing::debug!(path, "opened task database");
        Ok(task_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
