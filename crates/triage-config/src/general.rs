//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default database file, relative to the working directory.
fn default_db_path() -> String {
    String::from("tasks.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the SQLite file holding the `tasks` table.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}
