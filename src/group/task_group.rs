//! # TaskGroup: bounded fan-out with a single join barrier.
//!
//! The [`TaskGroup`] owns the concurrency bound, the fail-fast admission policy,
//! the shared counters and the barrier. Units are launched with
//! [`submit`](TaskGroup::submit); [`wait`](TaskGroup::wait) suspends until every
//! launched unit has reported and returns the tally.
//!
//! ## Architecture
//! ```text
//! submit(unit)
//!   ├─► admission::check ── Denied ──► publish UnitDenied, return (not counted)
//!   ├─► state.admit()      submitted += 1, pending += 1   (Reservation armed)
//!   ├─► gate.acquire_owned().await                         (bounded only: backpressure)
//!   ├─► tokio::spawn(runner::run_unit(ctx, unit, permit))
//!   └─► Reservation launched (a dropped submit future rolls the counters back instead)
//!
//! wait()
//!   ├─► state.drained().await                              (pending == 0)
//!   └─► (succeeded, GroupError of all failures joined by "; ")
//! ```
//!
//! ## Rules
//! - Counters are cumulative over the group's lifetime; `wait` may be called repeatedly.
//! - The fail-fast check is **best-effort**: it is not atomic with the launch.
//! - The gate is sized once, at construction, and never resized.
//! - The group never logs; failures are data returned by `wait`. Events go to
//!   subscribers only when some were configured.
//!
//! ## Example
//! ```rust
//! use taskgroup::{GroupConfig, TaskError, TaskGroup};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let group = TaskGroup::new(GroupConfig::default().with_max_concurrent(2));
//!
//!     for i in 0..4 {
//!         group
//!             .submit(move || async move {
//!                 if i == 3 {
//!                     return Err(TaskError::fail(format!("item {i} rejected")));
//!                 }
//!                 Ok(())
//!             })
//!             .await;
//!     }
//!
//!     let (succeeded, err) = group.wait().await;
//!     assert_eq!(succeeded, 3);
//!     assert_eq!(err.unwrap().to_string(), "item 3 rejected");
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    config::GroupConfig,
    error::{GroupError, TaskError},
    events::{Bus, Event, EventKind},
    observer::FaultObserverRef,
    subscribers::{Subscribe, SubscriberSet},
};

use super::{
    admission::{self, Admission},
    builder::TaskGroupBuilder,
    runner::{self, UnitContext},
    state::{GroupStats, SharedState},
};

/// Bounded-concurrency task group.
///
/// Share it between submitters with `Arc<TaskGroup>`; it is not `Clone`.
/// Dropping the group stops event delivery; units already launched still run to
/// completion and their outcomes are simply no longer observable.
pub struct TaskGroup {
    cfg: GroupConfig,
    label: Arc<str>,
    state: Arc<SharedState>,
    gate: Option<Arc<Semaphore>>,
    bus: Bus,
    observer: Option<FaultObserverRef>,
    _listener: Option<DropGuard>,
}

impl TaskGroup {
    /// Creates a group without subscribers or fault observer.
    ///
    /// Does not need a runtime; `submit` does.
    pub fn new(cfg: GroupConfig) -> Self {
        Self::from_parts(cfg, Vec::new(), None)
    }

    /// Returns a builder for attaching subscribers and a fault observer.
    pub fn builder(cfg: GroupConfig) -> TaskGroupBuilder {
        TaskGroupBuilder::new(cfg)
    }

    pub(crate) fn from_parts(
        cfg: GroupConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        observer: Option<FaultObserverRef>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let gate = cfg.concurrency_limit().map(Semaphore::new).map(Arc::new);
        let listener = (!subscribers.is_empty()).then(|| {
            let subs = SubscriberSet::new(subscribers, bus.clone());
            spawn_listener(&bus, subs)
        });

        Self {
            label: Arc::from(&*cfg.name),
            cfg,
            state: Arc::new(SharedState::default()),
            gate,
            bus,
            observer,
            _listener: listener,
        }
    }

    /// Submits one unit of work.
    ///
    /// The closure is called on a new Tokio task, inside the panic guard. Its
    /// outcome is only observable through [`wait`](Self::wait).
    ///
    /// ### Behavior
    /// - If `admit_after_failure` is off and a failure is already recorded, the unit
    ///   is skipped silently and not counted.
    /// - If the group is bounded, this waits for a free slot before launching
    ///   (backpressure on the submitter, no unbounded buffering).
    /// - Dropping this future while it waits for a slot cancels the submission:
    ///   the unit is never launched and not counted.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn submit<F, Fut>(&self, unit: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        if admission::check(self.cfg.admit_after_failure, &self.state) == Admission::Denied {
            self.bus
                .publish(Event::new(EventKind::UnitDenied).with_group(Arc::clone(&self.label)));
            return;
        }

        let reservation = Reservation::new(&self.state);
        self.bus.publish(
            Event::new(EventKind::UnitAdmitted)
                .with_group(Arc::clone(&self.label))
                .with_unit(reservation.unit),
        );

        let permit = match &self.gate {
            Some(gate) => match Arc::clone(gate).acquire_owned().await {
                Ok(permit) => Some(permit),
                // The gate is never closed; treat it like a cancelled submission.
                Err(_closed) => return,
            },
            None => None,
        };

        let ctx = UnitContext {
            unit: reservation.unit,
            group: Arc::clone(&self.label),
            state: Arc::clone(&self.state),
            bus: self.bus.clone(),
            observer: self.observer.clone(),
        };
        tokio::spawn(runner::run_unit(ctx, unit, permit));
        reservation.launched();
    }

    /// Waits until every launched unit has reported.
    ///
    /// Returns the cumulative success count and, if any unit failed or panicked,
    /// one [`GroupError`] listing every failure in completion order.
    /// With nothing submitted this returns `(0, None)` immediately.
    pub async fn wait(&self) -> (usize, Option<GroupError>) {
        self.state.drained().await;
        self.state.report()
    }

    /// Individual failures recorded so far, in completion order.
    pub fn failures(&self) -> Vec<TaskError> {
        self.state.failures()
    }

    /// Snapshot of the counters (does not wait).
    pub fn stats(&self) -> GroupStats {
        self.state.stats()
    }

    /// The configuration the group was built with.
    pub fn config(&self) -> &GroupConfig {
        &self.cfg
    }

    /// The group label attached to events.
    pub fn name(&self) -> &str {
        &self.label
    }
}

/// Counted-but-not-launched unit; rolled back if dropped before `launched()`.
struct Reservation<'a> {
    state: &'a SharedState,
    unit: u64,
    armed: bool,
}

impl<'a> Reservation<'a> {
    fn new(state: &'a SharedState) -> Self {
        Self {
            unit: state.admit(),
            state,
            armed: true,
        }
    }

    fn launched(mut self) {
        self.armed = false;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.abandon();
        }
    }
}

/// Forwards bus events to the subscriber set until the returned guard is dropped.
fn spawn_listener(bus: &Bus, subs: SubscriberSet) -> DropGuard {
    let token = CancellationToken::new();
    let stop = token.clone();
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                res = rx.recv() => match res {
                    Ok(ev) => subs.emit(Arc::new(ev)),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
            }
        }
        subs.shutdown().await;
    });
    token.drop_guard()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_wait_on_empty_group() {
        let group = TaskGroup::new(GroupConfig::default());
        assert_eq!(group.wait().await, (0, None));
        assert_eq!(group.stats(), GroupStats::default());
    }

    #[tokio::test]
    async fn test_wait_is_repeatable_and_cumulative() {
        let group = TaskGroup::new(GroupConfig::default().with_admit_after_failure(true));

        group.submit(|| async { Ok(()) }).await;
        let (ok, err) = group.wait().await;
        assert_eq!(ok, 1);
        assert!(err.is_none());

        group.submit(|| async { Err("E1".into()) }).await;
        group.submit(|| async { Ok(()) }).await;
        let (ok, err) = group.wait().await;
        assert_eq!(ok, 2);
        assert_eq!(err.unwrap().to_string(), "E1");

        assert_eq!(
            group.stats(),
            GroupStats {
                submitted: 3,
                succeeded: 2,
                failed: 1,
                pending: 0
            }
        );
    }

    #[tokio::test]
    async fn test_dropped_submit_rolls_back() {
        let group = TaskGroup::new(GroupConfig::default().with_max_concurrent(1));
        let (release, hold) = oneshot::channel::<()>();

        group
            .submit(|| async move {
                let _ = hold.await;
                Ok(())
            })
            .await;

        // The gate is saturated; this submission never gets a slot.
        let blocked = tokio::time::timeout(
            Duration::from_millis(20),
            group.submit(|| async { Err("never runs".into()) }),
        )
        .await;
        assert!(blocked.is_err());
        assert_eq!(group.stats().submitted, 1);
        assert_eq!(group.stats().pending, 1);

        let _ = release.send(());
        assert_eq!(group.wait().await, (1, None));
    }

    #[tokio::test]
    async fn test_accessors() {
        let group = TaskGroup::new(GroupConfig::default().with_name("ingest"));
        assert_eq!(group.name(), "ingest");
        assert_eq!(group.config().concurrency_limit(), None);
        assert!(group.failures().is_empty());
    }
}
