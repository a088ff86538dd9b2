//! # triage-core
//!
//! Core types and validation shared across all Triage crates:
//! - The `Task` entity stored in the `tasks` table
//! - `Priority` and `TaskStatus` enums with their toggles
//! - Cross-cutting error types
//! - Description validation applied before anything reaches the store

pub mod entities;
pub mod enums;
pub mod errors;
pub mod validation;
