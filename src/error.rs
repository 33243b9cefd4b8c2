//! Error types produced by units of work and by the task group barrier.
//!
//! This module defines two types:
//!
//! - [`TaskError`]: the failure record of a single unit (returned error or captured panic).
//! - [`GroupError`]: the aggregate returned by [`TaskGroup::wait`](crate::TaskGroup::wait)
//!   when at least one unit failed.
//!
//! Both provide helpers (`as_label`, `as_message`) for logs and metrics.

use std::fmt;

use thiserror::Error;

/// Fixed prefix of every panic-derived failure message.
pub const PANIC_MARKER: &str = "task panic";

/// # Failure of one unit of work.
///
/// A unit either returns one of these itself ([`TaskError::Fail`]) or the
/// execution wrapper builds one from a caught panic ([`TaskError::Panic`]).
///
/// `Fail` is displayed verbatim, so the caller controls the full message
/// (include the unit's identity in it if you need to know *which* unit failed).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The unit returned an error.
    #[error("{error}")]
    Fail {
        /// Message reported by the unit.
        error: String,
    },

    /// The unit panicked; the payload was captured at the task boundary.
    #[error("task panic: {payload}")]
    Panic {
        /// Panic payload rendered as text.
        ///
        /// String payloads, [`TaskError`] and `anyhow::Error` are kept; any other
        /// payload type (e.g. `panic_any(42)`) is recorded as `"unknown panic"`.
        payload: String,
    },
}

impl TaskError {
    /// Builds a [`TaskError::Fail`] from anything displayable.
    ///
    /// # Example
    /// ```
    /// use taskgroup::TaskError;
    ///
    /// let err = TaskError::fail(format_args!("row {} rejected", 7));
    /// assert_eq!(err.to_string(), "row 7 rejected");
    /// ```
    pub fn fail(error: impl fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskgroup::TaskError;
    ///
    /// assert_eq!(TaskError::fail("boom").as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panic { .. } => "task_panic",
        }
    }

    /// Returns the bare detail without the display prefix.
    pub fn as_message(&self) -> &str {
        match self {
            TaskError::Fail { error } => error,
            TaskError::Panic { payload } => payload,
        }
    }

    /// Indicates whether the failure was an abnormal termination.
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panic { .. })
    }
}

impl From<String> for TaskError {
    fn from(error: String) -> Self {
        TaskError::Fail { error }
    }
}

impl From<&str> for TaskError {
    fn from(error: &str) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }
}

impl From<anyhow::Error> for TaskError {
    /// Keeps the whole context chain (`outer: inner: root`).
    fn from(err: anyhow::Error) -> Self {
        TaskError::Fail {
            error: format!("{err:#}"),
        }
    }
}

/// # Aggregate failure reported by the join barrier.
///
/// Displays every recorded failure in completion order, separated by `"; "`.
/// No de-duplication is performed. The individual records stay available
/// through [`GroupError::failures`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.failures))]
pub struct GroupError {
    failures: Vec<TaskError>,
}

impl GroupError {
    /// Builds the aggregate, or `None` when nothing failed.
    pub(crate) fn from_failures(failures: &[TaskError]) -> Option<Self> {
        if failures.is_empty() {
            return None;
        }
        Some(Self {
            failures: failures.to_vec(),
        })
    }

    /// Individual failures in completion order.
    pub fn failures(&self) -> &[TaskError] {
        &self.failures
    }

    /// Consumes the aggregate and returns the individual failures.
    pub fn into_failures(self) -> Vec<TaskError> {
        self.failures
    }

    /// Number of recorded failures (never zero).
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always `false`; an aggregate is only built from at least one failure.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failures caused by panics.
    pub fn panics(&self) -> usize {
        self.failures.iter().filter(|f| f.is_panic()).count()
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "group_failed"
    }
}

fn join_messages(failures: &[TaskError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_is_displayed_verbatim() {
        assert_eq!(TaskError::fail("E1").to_string(), "E1");
        assert_eq!(TaskError::from("E2").to_string(), "E2");
        assert_eq!(TaskError::from(String::from("E3")).to_string(), "E3");
    }

    #[test]
    fn test_panic_carries_marker_and_payload() {
        let err = TaskError::Panic {
            payload: "P1".into(),
        };
        assert_eq!(err.to_string(), "task panic: P1");
        assert!(err.to_string().starts_with(PANIC_MARKER));
        assert!(err.is_panic());
        assert_eq!(err.as_label(), "task_panic");
        assert_eq!(err.as_message(), "P1");
    }

    #[test]
    fn test_anyhow_keeps_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("fetch shard 3");
        let task: TaskError = err.into();
        assert_eq!(task.to_string(), "fetch shard 3: connection refused");
    }

    #[test]
    fn test_group_error_joins_in_order() {
        let failures = vec![
            TaskError::fail("E1"),
            TaskError::Panic {
                payload: "P1".into(),
            },
            TaskError::fail("E1"),
        ];
        let err = GroupError::from_failures(&failures).unwrap();
        assert_eq!(err.to_string(), "E1; task panic: P1; E1");
        assert_eq!(err.len(), 3);
        assert_eq!(err.panics(), 1);
        assert_eq!(err.as_label(), "group_failed");
        assert_eq!(err.into_failures(), failures);
    }

    #[test]
    fn test_group_error_none_without_failures() {
        assert!(GroupError::from_failures(&[]).is_none());
    }
}
