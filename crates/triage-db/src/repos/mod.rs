//! Repository methods, implemented as `impl TaskStore` blocks.

pub mod task;
