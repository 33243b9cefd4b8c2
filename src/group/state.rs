//! # Shared counters and the join barrier.
//!
//! Every counter and the failure list live behind **one** mutex; the barrier is a
//! [`Notify`] released when `pending` returns to zero.
//!
//! ```text
//!  submit ──► admit()    : submitted += 1, pending += 1
//!  submit ──► abandon()  : submitted -= 1, pending -= 1   (submit dropped before launch)
//!  runner ──► record(ok) : succeeded += 1, pending -= 1
//!  runner ──► record(err): failures.push(err), pending -= 1
//!                              └─ pending == 0 ─► notify_waiters()
//!  wait   ──► drained()  : register waiter, then check pending (no lost wakeup)
//! ```
//!
//! The lock is never held across an `.await` and never while user code runs.

use std::pin::pin;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::error::{GroupError, TaskError};

/// Point-in-time view of a group's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    /// Units admitted and launched (denied submissions are not counted).
    pub submitted: usize,
    /// Units that returned `Ok(())`.
    pub succeeded: usize,
    /// Units that returned an error or panicked.
    pub failed: usize,
    /// Units launched but not yet reported.
    pub pending: usize,
}

#[derive(Debug, Default)]
struct Counters {
    submitted: usize,
    pending: usize,
    succeeded: usize,
    failures: Vec<TaskError>,
    last_unit: u64,
}

/// State shared between the group handle and every running unit.
#[derive(Debug, Default)]
pub(crate) struct SharedState {
    counters: Mutex<Counters>,
    drained: Notify,
}

impl SharedState {
    /// Poison is ignored; no user code runs under this lock.
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True once at least one failure has been recorded.
    pub(crate) fn has_failed(&self) -> bool {
        !self.lock().failures.is_empty()
    }

    /// Counts a new unit as submitted and pending; returns its 1-based id.
    pub(crate) fn admit(&self) -> u64 {
        let mut c = self.lock();
        c.submitted += 1;
        c.pending += 1;
        c.last_unit += 1;
        c.last_unit
    }

    /// Reverts [`admit`](Self::admit) for a unit that was never launched.
    pub(crate) fn abandon(&self) {
        let drained = {
            let mut c = self.lock();
            c.submitted -= 1;
            c.pending -= 1;
            c.pending == 0
        };
        if drained {
            self.drained.notify_waiters();
        }
    }

    /// Records the outcome of a finished unit.
    ///
    /// Returns `true` if this was the last pending unit.
    pub(crate) fn record(&self, outcome: Result<(), TaskError>) -> bool {
        let drained = {
            let mut c = self.lock();
            match outcome {
                Ok(()) => c.succeeded += 1,
                Err(err) => c.failures.push(err),
            }
            c.pending -= 1;
            c.pending == 0
        };
        if drained {
            self.drained.notify_waiters();
        }
        drained
    }

    /// Resolves once `pending` is zero.
    pub(crate) async fn drained(&self) {
        loop {
            let mut notified = pin!(self.drained.notified());
            notified.as_mut().enable();
            if self.lock().pending == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Current success count and combined error.
    pub(crate) fn report(&self) -> (usize, Option<GroupError>) {
        let c = self.lock();
        (c.succeeded, GroupError::from_failures(&c.failures))
    }

    pub(crate) fn failures(&self) -> Vec<TaskError> {
        self.lock().failures.clone()
    }

    pub(crate) fn stats(&self) -> GroupStats {
        let c = self.lock();
        GroupStats {
            submitted: c.submitted,
            succeeded: c.succeeded,
            failed: c.failures.len(),
            pending: c.pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drained_immediately_when_idle() {
        let state = SharedState::default();
        state.drained().await;
        assert_eq!(state.report(), (0, None));
    }

    #[test]
    fn test_ids_are_monotonic_across_abandon() {
        let state = SharedState::default();
        assert_eq!(state.admit(), 1);
        state.abandon();
        assert_eq!(state.admit(), 2);
        assert_eq!(
            state.stats(),
            GroupStats {
                submitted: 1,
                succeeded: 0,
                failed: 0,
                pending: 1
            }
        );
    }

    #[test]
    fn test_record_tallies_and_reports_last() {
        let state = SharedState::default();
        state.admit();
        state.admit();
        assert!(!state.record(Ok(())));
        assert!(!state.has_failed());
        assert!(state.record(Err(TaskError::fail("E1"))));
        assert!(state.has_failed());

        let (ok, err) = state.report();
        assert_eq!(ok, 1);
        assert_eq!(err.unwrap().to_string(), "E1");
        assert_eq!(state.stats().pending, 0);
    }

    #[tokio::test]
    async fn test_waiter_released_by_last_record() {
        let state = Arc::new(SharedState::default());
        state.admit();

        let waiter = {
            let state = Arc::clone(&state);
            tokio::spawn(async move { state.drained().await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        state.record(Ok(()));
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter not released")
            .unwrap();
    }
}
