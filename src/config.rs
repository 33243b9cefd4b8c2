//! # Task group configuration.
//!
//! Provides [`GroupConfig`], the settings a [`TaskGroup`](crate::TaskGroup) is built from.
//! The configuration is consumed at construction and is read-only afterwards.
//!
//! ## Sentinel values
//! - `max_concurrent = 0` → unbounded (no admission gate created)
//! - `bus_capacity = 0` → clamped to 1 by the event bus
//!
//! ## Example
//! ```
//! use taskgroup::GroupConfig;
//!
//! let cfg = GroupConfig::default()
//!     .with_name("thumbnails")
//!     .with_max_concurrent(4);
//!
//! assert_eq!(cfg.concurrency_limit(), Some(4));
//! assert!(!cfg.admit_after_failure);
//! ```

use std::borrow::Cow;

/// Configuration for a task group.
///
/// ## Field semantics
/// - `max_concurrent`: how many units may run at once (`0` = unbounded)
/// - `admit_after_failure`: keep launching submissions after a failure was recorded
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
/// - `name`: label attached to every event published by the group
///
/// All fields are public. Prefer the helper accessors over checking the `0`
/// sentinel by hand.
#[derive(Clone, Debug)]
pub struct GroupConfig {
    /// Maximum number of units running simultaneously.
    ///
    /// - `0` = unbounded (no semaphore)
    /// - `n > 0` = at most `n` units run at once; `submit` waits for a free slot
    pub max_concurrent: usize,

    /// Whether submissions are still launched once a unit has failed.
    ///
    /// With `false` (default) a submission that observes a recorded failure is
    /// silently skipped. The check is best-effort: submissions racing with the
    /// first failure may still run.
    pub admit_after_failure: bool,

    /// Capacity of the event bus broadcast channel.
    ///
    /// Subscribers lagging more than `bus_capacity` events behind skip the oldest ones.
    pub bus_capacity: usize,

    /// Group label carried by every published event.
    pub name: Cow<'static, str>,
}

impl GroupConfig {
    /// Returns the concurrency bound as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` concurrent units
    #[inline]
    pub fn concurrency_limit(&self) -> Option<usize> {
        match self.max_concurrent {
            0 => None,
            n => Some(n),
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a config with an updated concurrency bound.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Returns a config with an updated failure admission flag.
    pub fn with_admit_after_failure(mut self, admit: bool) -> Self {
        self.admit_after_failure = admit;
        self
    }

    /// Returns a config with an updated group label.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for GroupConfig {
    /// Default configuration:
    ///
    /// - `max_concurrent = 0` (unbounded)
    /// - `admit_after_failure = false` (fail-fast admission)
    /// - `bus_capacity = 1024`
    /// - `name = "taskgroup"`
    fn default() -> Self {
        Self {
            max_concurrent: 0,
            admit_after_failure: false,
            bus_capacity: 1024,
            name: Cow::Borrowed("taskgroup"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GroupConfig::default();
        assert_eq!(cfg.max_concurrent, 0);
        assert_eq!(cfg.concurrency_limit(), None);
        assert!(!cfg.admit_after_failure);
        assert_eq!(cfg.bus_capacity, 1024);
        assert_eq!(cfg.name, "taskgroup");
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = GroupConfig {
            bus_capacity: 0,
            ..GroupConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }

    #[test]
    fn test_fluent_setters() {
        let cfg = GroupConfig::default()
            .with_max_concurrent(3)
            .with_admit_after_failure(true)
            .with_name(String::from("ingest"));
        assert_eq!(cfg.concurrency_limit(), Some(3));
        assert!(cfg.admit_after_failure);
        assert_eq!(cfg.name, "ingest");
    }
}
