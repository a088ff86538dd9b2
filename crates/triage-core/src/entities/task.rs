use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, TaskStatus};

/// A to-do item.
///
/// `id` and `created_date` are assigned by the store and never change;
/// `description`, `priority` and `status` are mutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub priority: Priority,
    pub created_date: DateTime<Utc>,
    pub status: TaskStatus,
}

impl Task {
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        matches!(self.priority, Priority::Urgent)
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed)
    }
}
