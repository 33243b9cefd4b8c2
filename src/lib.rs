//! # taskgroup
//!
//! **Taskgroup** runs a set of async units of work concurrently under an optional
//! concurrency bound, isolates every failure (returned error or panic) and joins
//! them with a single barrier that reports the success count and one combined error.
//!
//! It also ships the small building blocks the group is made of: guarded detached
//! spawns, an injectable fault observer and a set-once error slot.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     submit(unit #1)     submit(unit #2)     submit(unit #3)
//!            │                   │                   │
//!            ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  TaskGroup                                                        │
//! │  - admission check (fail-fast, best-effort)                       │
//! │  - gate (Semaphore, only when max_concurrent > 0)                 │
//! │  - SharedState (counters + failure list + drain barrier)          │
//! │  - Bus (broadcast events)                                         │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   │
//!     │  run_unit    │   │  run_unit    │   │  run_unit    │   │
//!     │ (own task,   │   │ (own task,   │   │ (own task,   │   │
//!     │ catch_unwind)│   │ catch_unwind)│   │ catch_unwind)│   │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘   │
//!      │ UnitStarting     │ UnitSucceeded    │ UnitPanicked    │ UnitAdmitted
//!      │ UnitFailed       │ GroupDrained     │ (FaultObserver) │ UnitDenied
//!      ▼                  ▼                  ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                (capacity: GroupConfig::bus_capacity)              │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │     event listener     │
//!                       │ (only with subscribers)│
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                           (per-sub queues)
//!                         ┌─────────┼─────────┐
//!                         ▼         ▼         ▼
//!                      worker1   worker2   workerN
//! ```
//!
//! ### Lifecycle
//! ```text
//! submit(unit)
//!   ├─► failure recorded && !admit_after_failure ─► skip (UnitDenied)
//!   ├─► submitted += 1, pending += 1
//!   ├─► acquire gate permit (bounded only, waits)
//!   └─► tokio::spawn(run_unit)
//!          ├─ Ok    ─► succeeded += 1
//!          ├─ Err   ─► failures.push(err)
//!          └─ panic ─► failures.push("task panic: <payload>")
//!          release permit, pending -= 1 ─► pending == 0 ? wake waiters
//!
//! wait() ─► until pending == 0 ─► (succeeded, failures joined by "; ")
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Group**         | Bounded fan-out, fail-fast admission, join barrier.          | [`TaskGroup`], [`TaskGroupBuilder`]       |
//! | **Errors**        | Per-unit failures and the combined barrier error.            | [`TaskError`], [`GroupError`]             |
//! | **Subscriber API**| Hook into unit lifecycle events (logging, metrics, custom).  | [`Subscribe`], [`Event`]                  |
//! | **Panic capture** | Detached spawns that report panics instead of losing them.   | [`spawn_guarded`], [`FaultObserver`]      |
//! | **First error**   | Keep the earliest error out of many concurrent reports.      | [`OnceError`]                             |
//! | **Configuration** | Bound, admission policy, bus capacity, label.                | [`GroupConfig`]                           |
//!
//! ## Optional features
//! - `logging`: exports the built-in [`LogWriter`] subscriber (writes through `tracing`).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use taskgroup::{GroupConfig, TaskError, TaskGroup};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cfg = GroupConfig::default()
//!         .with_name("resize")
//!         .with_max_concurrent(2)
//!         .with_admit_after_failure(true);
//!
//!     // Build subscribers (optional)
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn taskgroup::Subscribe>> = vec![Arc::new(taskgroup::LogWriter::new())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn taskgroup::Subscribe>> = Vec::new();
//!
//!     let group = TaskGroup::builder(cfg).with_subscribers(subs).build();
//!
//!     for name in ["a.png", "b.png", "broken.png"] {
//!         group
//!             .submit(move || async move {
//!                 if name.starts_with("broken") {
//!                     return Err(TaskError::fail(format!("{name}: bad header")));
//!                 }
//!                 Ok(())
//!             })
//!             .await;
//!     }
//!
//!     let (succeeded, err) = group.wait().await;
//!     assert_eq!(succeeded, 2);
//!     assert_eq!(err.unwrap().to_string(), "broken.png: bad header");
//! }
//! ```
mod config;
mod error;
mod events;
mod group;
mod observer;
mod once;
mod spawn;
mod subscribers;

// ---- Public re-exports ----

pub use config::GroupConfig;
pub use error::{GroupError, PANIC_MARKER, TaskError};
pub use events::{Bus, Event, EventKind};
pub use group::{GroupStats, TaskGroup, TaskGroupBuilder};
pub use observer::{Fault, FaultObserver, FaultObserverRef};
pub use once::OnceError;
pub use spawn::{spawn_guarded, spawn_with_callback};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose the built-in `tracing` subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
