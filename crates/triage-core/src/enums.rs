//! Priority and status enums for Triage.
//!
//! Both enums serialize with their variant names (`"Urgent"`, `"Pending"`),
//! which is also the form stored in the `tasks` table. Each has exactly two
//! variants, so the only transition is a toggle.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Advisory priority label for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    #[default]
    Normal,
}

impl Priority {
    /// Both labels, in the order selectors present them.
    pub const ALL: [Self; 2] = [Self::Urgent, Self::Normal];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Normal => "Normal",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Urgent => Self::Normal,
            Self::Normal => Self::Urgent,
        }
    }

    /// Match a free-form label case-insensitively, ignoring surrounding
    /// whitespace. Returns `None` for anything other than the two labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle flag of a task.
///
/// ```text
/// pending ⇄ completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub const ALL: [Self; 2] = [Self::Pending, Self::Completed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
