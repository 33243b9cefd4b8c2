//! Group events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `TaskGroup::submit` (admitted/denied), the unit wrapper
//!   (starting/succeeded/failed/panicked/drained), `SubscriberSet` workers (overflow/panic).
//! - **Consumer**: the group's event listener, which fans out to `SubscriberSet`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
