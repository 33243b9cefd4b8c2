//! # LogWriter: structured event logging
//!
//! A subscriber that turns group [`Event`]s into `tracing` records. Install any
//! `tracing` subscriber (e.g. `tracing-subscriber`'s fmt layer) to see them.
//!
//! ## Levels
//! - `DEBUG`: admitted, starting, succeeded, drained
//! - `INFO`: denied (fail-fast admission skipped a unit)
//! - `WARN`: unit failed, subscriber overflow
//! - `ERROR`: unit panicked, subscriber panicked
//!
//! ## Example output (fmt layer)
//! ```text
//! DEBUG taskgroup: unit starting group="ingest" unit=3
//!  WARN taskgroup: unit failed group="ingest" unit=3 reason="E1"
//! ERROR taskgroup: unit panicked group="ingest" unit=4 payload="P1"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// `tracing`-backed event writer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let group = e.group.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::UnitAdmitted => {
                tracing::debug!(target: "taskgroup", group, unit = e.unit, "unit admitted");
            }
            EventKind::UnitDenied => {
                tracing::info!(target: "taskgroup", group, "unit denied after failure");
            }
            EventKind::UnitStarting => {
                tracing::debug!(target: "taskgroup", group, unit = e.unit, "unit starting");
            }
            EventKind::UnitSucceeded => {
                tracing::debug!(target: "taskgroup", group, unit = e.unit, "unit succeeded");
            }
            EventKind::UnitFailed => {
                tracing::warn!(
                    target: "taskgroup",
                    group,
                    unit = e.unit,
                    reason = e.reason.as_deref(),
                    "unit failed"
                );
            }
            EventKind::UnitPanicked => {
                tracing::error!(
                    target: "taskgroup",
                    group,
                    unit = e.unit,
                    payload = e.reason.as_deref(),
                    "unit panicked"
                );
            }
            EventKind::GroupDrained => {
                tracing::debug!(target: "taskgroup", group, "group drained");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(
                    target: "taskgroup",
                    subscriber = e.subscriber,
                    reason = e.reason.as_deref(),
                    "subscriber dropped event"
                );
            }
            EventKind::SubscriberPanicked => {
                tracing::error!(
                    target: "taskgroup",
                    subscriber = e.subscriber,
                    payload = e.reason.as_deref(),
                    "subscriber panicked"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
