//! The task store.
//!
//! `TaskStore` wraps `TaskDb`; all task operations are implemented as
//! `impl TaskStore` in [`crate::repos`].

use crate::TaskDb;
use crate::error::DatabaseError;

/// Sole owner of persisted tasks.
pub struct TaskStore {
    db: TaskDb,
}

impl TaskStore {
    /// Open a store backed by a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TaskDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TaskDb {
        &self.db
    }
}
