//! Core error type for Triage.
//!
//! Domain-specific errors (`DatabaseError`, `ClassifyError`, `ConfigError`)
//! live in their own crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors raised by core validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// User input failed validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),
}
