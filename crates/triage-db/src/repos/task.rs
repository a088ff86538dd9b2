//! Task repository: CRUD plus single-field toggles.

use chrono::Utc;

use triage_core::entities::Task;
use triage_core::enums::{Priority, TaskStatus};
use triage_core::validation::validate_description;

use crate::error::DatabaseError;
use crate::helpers::{CREATED_INSTANT_SQL, format_datetime, parse_datetime, parse_enum};
use crate::service::TaskStore;
use crate::updates::task::{TaskUpdate, TaskUpdateBuilder};

const SELECT_COLS: &str = "id, description, priority, created_date, status";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        priority: parse_enum(&row.get::<String>(2)?)?,
        created_date: parse_datetime(&row.get::<String>(3)?)?,
        status: parse_enum(&row.get::<String>(4)?)?,
    })
}

impl TaskStore {
    /// Insert a task stamped with the current time and return its new id.
    ///
    /// The description is trimmed; an empty one is rejected.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Invalid` for an empty description, or a
    /// libSQL error if the file cannot be written.
    pub async fn add_task(
        &self,
        description: &str,
        priority: Priority,
        status: TaskStatus,
    ) -> Result<i64, DatabaseError> {
        let description = validate_description(description)?;
        let now = format_datetime(Utc::now());

        self.db()
            .conn()
            .execute(
                "INSERT INTO tasks (description, priority, created_date, status)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![description, priority.as_str(), now, status.as_str()],
            )
            .await?;

        let id = self.db().conn().last_insert_rowid();
        tracing::debug!(id, %priority, %status, "task added");
        Ok(id)
    }

    /// Every task, newest first by creation instant, whichever timestamp
    /// format the row holds. Tasks created in the same second come back in
    /// reverse id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks ORDER BY {CREATED_INSTANT_SQL} DESC, id DESC"
                ),
                (),
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Point lookup. An unknown id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be parsed.
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    /// Write the supplied fields of `update` to task `id`.
    ///
    /// An empty update touches nothing. An unknown id affects no row and is
    /// not reported.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Invalid` if the new description is empty, or
    /// a libSQL error if the statement fails.
    pub async fn update_task(&self, id: i64, update: TaskUpdate) -> Result<(), DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref description) = update.description {
            let description = validate_description(description)?;
            sets.push(format!("description = ?{idx}"));
            params.push(description.to_string().into());
            idx += 1;
        }
        if let Some(priority) = update.priority {
            sets.push(format!("priority = ?{idx}"));
            params.push(priority.as_str().into());
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(());
        }

        params.push(id.into());
        let sql = format!("UPDATE tasks SET {} WHERE id = ?{idx}", sets.join(", "));
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        tracing::debug!(id, affected, "task updated");
        Ok(())
    }

    /// Shorthand for an update that only sets the priority.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn set_priority(&self, id: i64, priority: Priority) -> Result<(), DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().priority(priority).build())
            .await
    }

    /// Shorthand for an update that only sets the status.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn set_status(&self, id: i64, status: TaskStatus) -> Result<(), DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().status(status).build())
            .await
    }

    /// Flip Pending/Completed. Returns the new status, or `None` if `id` is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either statement fails.
    pub async fn toggle_status(&self, id: i64) -> Result<Option<TaskStatus>, DatabaseError> {
        let Some(task) = self.get_task(id).await? else {
            return Ok(None);
        };
        let next = task.status.toggled();
        self.set_status(id, next).await?;
        Ok(Some(next))
    }

    /// Flip Urgent/Normal. Returns the new priority, or `None` if `id` is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either statement fails.
    pub async fn toggle_priority(&self, id: i64) -> Result<Option<Priority>, DatabaseError> {
        let Some(task) = self.get_task(id).await? else {
            return Ok(None);
        };
        let next = task.priority.toggled();
        self.set_priority(id, next).await?;
        Ok(Some(next))
    }

    /// Remove task `id` if it exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .await?;
        tracing::debug!(id, affected, "task deleted");
        Ok(())
    }
}
