//! Partial-update builders for store entities.

pub mod task;
