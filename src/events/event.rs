//! # Lifecycle events emitted by a task group.
//!
//! The [`EventKind`] enum classifies events into three categories:
//! - **Admission events**: what `submit` decided (admitted, denied)
//! - **Unit events**: execution flow of one unit (starting, succeeded, failed, panicked)
//! - **Group / subscriber events**: barrier drained, subscriber overflow or panic
//!
//! The [`Event`] struct carries the metadata: timestamp, group label, unit id, reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore publication order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use taskgroup::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::UnitFailed)
//!     .with_group("ingest")
//!     .with_unit(3)
//!     .with_reason("E1");
//!
//! assert_eq!(ev.kind, EventKind::UnitFailed);
//! assert_eq!(ev.group.as_deref(), Some("ingest"));
//! assert_eq!(ev.unit, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of task group events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Admission ===
    /// A submission passed the admission check and was counted.
    ///
    /// Sets: `group`, `unit`.
    UnitAdmitted,

    /// A submission was skipped because a failure was already recorded.
    ///
    /// Sets: `group`. No unit id is assigned to denied submissions.
    UnitDenied,

    // === Unit lifecycle ===
    /// The unit holds its gate permit (if bounded) and is about to run.
    ///
    /// Sets: `group`, `unit`.
    UnitStarting,

    /// The unit returned `Ok(())`.
    ///
    /// Sets: `group`, `unit`.
    UnitSucceeded,

    /// The unit returned an error.
    ///
    /// Sets: `group`, `unit`, `reason` (error message).
    UnitFailed,

    /// The unit panicked; the panic was captured.
    ///
    /// Sets: `group`, `unit`, `reason` (panic payload).
    UnitPanicked,

    // === Group ===
    /// The pending count returned to zero; waiters were released.
    ///
    /// Sets: `group`.
    GroupDrained,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `subscriber`, `reason` (panic payload).
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `subscriber`, `reason` ("full" or "closed").
    SubscriberOverflow,
}

/// Task group event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Label of the emitting group.
    pub group: Option<Arc<str>>,
    /// 1-based unit id, assigned in admission order.
    pub unit: Option<u64>,
    /// Subscriber name (subscriber events only).
    pub subscriber: Option<&'static str>,
    /// Human-readable reason (error message, panic payload, overflow cause).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            group: None,
            unit: None,
            subscriber: None,
            reason: None,
        }
    }

    /// Attaches a group label.
    #[inline]
    pub fn with_group(mut self, group: impl Into<Arc<str>>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attaches a unit id.
    #[inline]
    pub fn with_unit(mut self, unit: u64) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        let mut ev = Event::new(EventKind::SubscriberOverflow).with_reason(reason);
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = Event::new(EventKind::SubscriberPanicked).with_reason(info);
        ev.subscriber = Some(subscriber);
        ev
    }

    /// True for events describing a unit reaching a terminal state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::UnitSucceeded | EventKind::UnitFailed | EventKind::UnitPanicked
        )
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::UnitAdmitted);
        let b = Event::new(EventKind::UnitStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(Event::new(EventKind::UnitSucceeded).is_terminal());
        assert!(Event::new(EventKind::UnitFailed).is_terminal());
        assert!(Event::new(EventKind::UnitPanicked).is_terminal());
        assert!(!Event::new(EventKind::UnitStarting).is_terminal());
        assert!(!Event::new(EventKind::UnitDenied).is_terminal());
    }

    #[test]
    fn test_subscriber_constructors() {
        let ev = Event::subscriber_overflow("metrics", "full");
        assert!(ev.is_subscriber_overflow());
        assert_eq!(ev.subscriber, Some("metrics"));
        assert_eq!(ev.reason.as_deref(), Some("full"));

        let ev = Event::subscriber_panicked("audit", "boom".into());
        assert!(ev.is_subscriber_panic());
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }
}
