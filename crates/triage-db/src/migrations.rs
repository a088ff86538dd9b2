//! Database migration runner.
//!
//! Embeds the SQL at compile time and executes it on open. Every statement
//! uses `IF NOT EXISTS`, so re-running is a no-op.

use crate::TaskDb;
use crate::error::DatabaseError;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl TaskDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
