//! # Fail-fast admission check
//!
//! Decides, per submission, whether a unit is launched at all.
//!
//! ## Variants
//! - `Admitted`: the unit is counted and launched.
//! - `Denied`: `admit_after_failure` is off and a failure has already been recorded;
//!   the unit is dropped without running and without being counted.
//!
//! ## Invariants
//! - The check reads the failure list once, under the state lock, and releases it.
//!   It is **not** atomic with the launch that follows: submissions racing with the
//!   first failure may pass the check and still run.
//! - Denial is silent. It is not an error and is never reported to the submitter.

use super::state::SharedState;

/// Outcome of the admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Launch the unit.
    Admitted,
    /// Skip the unit.
    Denied,
}

/// Evaluates the fail-fast policy against the current failure list.
pub(crate) fn check(admit_after_failure: bool, state: &SharedState) -> Admission {
    if !admit_after_failure && state.has_failed() {
        Admission::Denied
    } else {
        Admission::Admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskError;

    #[test]
    fn test_admits_before_any_failure() {
        let state = SharedState::default();
        assert_eq!(check(false, &state), Admission::Admitted);
        assert_eq!(check(true, &state), Admission::Admitted);
    }

    #[test]
    fn test_denies_after_failure_only_when_fail_fast() {
        let state = SharedState::default();
        state.admit();
        state.record(Err(TaskError::fail("E1")));
        assert_eq!(check(false, &state), Admission::Denied);
        assert_eq!(check(true, &state), Admission::Admitted);
    }
}
