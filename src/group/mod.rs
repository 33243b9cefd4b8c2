//! # Task group core.
//!
//! - [`TaskGroup`] the handle: submit, wait, snapshots
//! - [`TaskGroupBuilder`] attaches subscribers and a fault observer
//! - [`GroupStats`] counter snapshot
//!
//! Internals: `state` (counters + barrier), `admission` (fail-fast check),
//! `runner` (failure-isolating unit wrapper).

mod admission;
mod builder;
mod runner;
mod state;
mod task_group;

pub use builder::TaskGroupBuilder;
pub use state::GroupStats;
pub use task_group::TaskGroup;
