//! # First-error slot.
//!
//! [`OnceError`] keeps the first error reported by any number of concurrent
//! contexts and ignores the rest. Useful when several workers race to report
//! and only the earliest cause matters.

use std::sync::OnceLock;

/// Thread-safe, set-once error holder.
///
/// # Example
/// ```rust
/// use taskgroup::OnceError;
///
/// let slot = OnceError::new();
/// assert!(slot.set("disk full"));
/// assert!(!slot.set("timeout"));
/// assert_eq!(slot.get(), Some(&"disk full"));
/// ```
#[derive(Debug)]
pub struct OnceError<E> {
    slot: OnceLock<E>,
}

impl<E> OnceError<E> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Stores `err` if the slot is still empty.
    ///
    /// Returns `true` if this call won; later errors are dropped.
    pub fn set(&self, err: E) -> bool {
        self.slot.set(err).is_ok()
    }

    /// Returns the first stored error, if any.
    pub fn get(&self) -> Option<&E> {
        self.slot.get()
    }

    /// Consumes the slot and returns the stored error, if any.
    pub fn into_inner(self) -> Option<E> {
        self.slot.into_inner()
    }
}

impl<E> Default for OnceError<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::TaskError;

    #[test]
    fn test_empty_slot() {
        let slot: OnceError<TaskError> = OnceError::default();
        assert!(slot.get().is_none());
        assert!(slot.into_inner().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_only_one_concurrent_writer_wins() {
        let slot = Arc::new(OnceError::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let slot = Arc::clone(&slot);
            handles.push(tokio::spawn(async move {
                slot.set(TaskError::fail(format!("worker {i}")))
            }));
        }

        let mut winners = 0;
        for h in handles {
            if h.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert!(slot.get().unwrap().to_string().starts_with("worker "));
    }
}
