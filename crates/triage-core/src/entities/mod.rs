//! Entity structs for Triage domain objects.
//!
//! There is exactly one: [`Task`], mapped to the `tasks` table.

mod task;

pub use task::Task;
