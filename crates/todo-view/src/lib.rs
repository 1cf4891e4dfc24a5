//! Derived views over lists and todos.
//!
//! Everything here is a pure function of its input: nothing is stored and
//! nothing is mutated, so the results can be computed for any backend and
//! tested without one.
//!
//! - [`status`]: completion state and counts of a single list
//! - [`order`]: display ordering (unfinished first, stable)
//! - [`summary`]: serialisable records combining the two for callers

pub mod order;
pub mod status;
pub mod summary;

pub use order::{partition_by, partition_lists, partition_todos};
pub use status::{is_list_complete, remaining_count, todos_count};
pub use summary::{ListSummary, ListView};
