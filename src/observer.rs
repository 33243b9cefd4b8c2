//! # Fault observer: an injectable hook for captured panics.
//!
//! Whoever launches concurrent work ([`TaskGroup`](crate::TaskGroup),
//! [`spawn_guarded`](crate::spawn_guarded), [`spawn_with_callback`](crate::spawn_with_callback))
//! takes an optional [`FaultObserver`] explicitly. There is no process-wide handler:
//! each component gets its own observer, and tests can substitute theirs.
//!
//! The observer is called synchronously on the task that panicked, right after the
//! panic was caught. Keep it short and non-blocking.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use taskgroup::{Fault, FaultObserver, FaultObserverRef};
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let observer: FaultObserverRef = Arc::new(move |_fault: &Fault| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! observer.on_fault(&Fault::new("boom"));
//! assert_eq!(seen.load(Ordering::Relaxed), 1);
//! ```

use std::sync::Arc;

/// A captured panic, as reported to a [`FaultObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Label of the group the unit belonged to (`None` for detached spawns).
    pub group: Option<Arc<str>>,
    /// Unit id within the group (`None` for detached spawns).
    pub unit: Option<u64>,
    /// Panic payload rendered as text.
    pub payload: String,
}

impl Fault {
    /// Creates a fault without group context.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            group: None,
            unit: None,
            payload: payload.into(),
        }
    }

    /// Attaches the owning group and unit id.
    pub fn in_unit(mut self, group: Arc<str>, unit: u64) -> Self {
        self.group = Some(group);
        self.unit = Some(unit);
        self
    }
}

/// Receives every panic captured by the component it was given to.
///
/// Implemented for any `Fn(&Fault) + Send + Sync + 'static` closure.
pub trait FaultObserver: Send + Sync + 'static {
    /// Called once per captured panic.
    fn on_fault(&self, fault: &Fault);
}

impl<F> FaultObserver for F
where
    F: Fn(&Fault) + Send + Sync + 'static,
{
    fn on_fault(&self, fault: &Fault) {
        self(fault)
    }
}

/// Shared handle to a fault observer.
pub type FaultObserverRef = Arc<dyn FaultObserver>;
