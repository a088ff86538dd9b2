//! # triage-config
//!
//! Layered configuration loading for Triage using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRIAGE_*` prefix, `__` as separator)
//! 2. `OPENAI_API_KEY`, mapped to `openai.api_key`
//! 3. Project-level `.triage/config.toml`
//! 4. User-level `~/.config/triage/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRIAGE_OPENAI__MODEL` -> `openai.model`,
//! `TRIAGE_GENERAL__DB_PATH` -> `general.db_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use triage_config::TriageConfig;
//!
//! let config = TriageConfig::load_with_dotenv().expect("config");
//! if !config.openai.is_configured() {
//!     println!("keyword prioritization only");
//! }
//! ```

mod error;
mod general;
mod openai;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use openai::OpenAiConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the conventional credential variable.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TriageConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// A missing `.env` is not an error. Values already present in the
    /// process environment win over the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `.env` is malformed, extraction fails, or
    /// a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::load()
    }

    /// Load configuration after reading a specific dotenv file.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_with_dotenv`].
    pub fn load_with_dotenv_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            dotenvy::from_path(path)?;
        }
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_from(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".triage/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment = figment.merge(
            Env::raw()
                .only(&[OPENAI_API_KEY_VAR])
                .map(|_| "openai.api_key".into()),
        );

        figment.merge(Env::prefixed("TRIAGE_").split("__"))
    }

    /// Reject values the rest of the system cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.db_path.trim().is_empty() {
            return Err(invalid("general.db_path", "must not be empty"));
        }
        if self.openai.max_attempts == 0 {
            return Err(invalid("openai.max_attempts", "must be at least 1"));
        }
        if self.openai.timeout_secs == 0 {
            return Err(invalid("openai.timeout_secs", "must be at least 1"));
        }
        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err(invalid("openai.temperature", "must be between 0.0 and 2.0"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("triage").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
