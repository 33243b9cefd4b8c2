//! # Event bus for broadcasting group events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking publishing from many sources (submitters, unit wrappers, subscriber workers).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                     Consumer (one):
//!   submit()       ──┐
//!   unit wrapper 1 ──┼──────► Bus ───────► event listener ────► SubscriberSet
//!   unit wrapper N ──┤  (broadcast chan)   (in TaskGroup)
//!   sub. workers   ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks.
//! - **Bounded capacity**: one ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are dropped when nobody is subscribed.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for group events.
///
/// Cheap to clone (internally an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers the event is dropped; this never fails.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver that observes events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
