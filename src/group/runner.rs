//! # Failure-isolating execution of one unit.
//!
//! Runs exactly one unit on its own Tokio task so that no outcome (success,
//! returned error, panic) can escape or leave the shared state inconsistent.
//!
//! ## Flow
//! ```text
//! run_unit(ctx, unit, permit)
//!   ├─► publish UnitStarting
//!   ├─► catch_unwind( unit().await )
//!   │       ├─ Ok(Ok(()))  ─► publish UnitSucceeded          ─► record(Ok)
//!   │       ├─ Ok(Err(e))  ─► publish UnitFailed             ─► record(Err(e))
//!   │       └─ panic       ─► observer.on_fault, UnitPanicked ─► record(Err(Panic))
//!   ├─► release gate permit
//!   └─► record(..) ─► pending == 0 ? publish GroupDrained
//! ```
//!
//! ## Rules
//! - The unit closure is **called inside** the unwind guard: a panic while building
//!   the future is caught the same way as one while polling it.
//! - Exactly one `record` per unit; the permit is released before it, so a waiter
//!   released by the last `record` never finds the gate occupied by finished units.
//! - `AssertUnwindSafe` is used. A unit that panics while holding its own lock
//!   may leave *its* data poisoned; the group's counters are unaffected.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::OwnedSemaphorePermit;

use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::observer::{Fault, FaultObserverRef};
use crate::spawn::panic_message;

use super::state::SharedState;

/// Everything a running unit needs to report back.
pub(crate) struct UnitContext {
    pub(crate) unit: u64,
    pub(crate) group: Arc<str>,
    pub(crate) state: Arc<SharedState>,
    pub(crate) bus: Bus,
    pub(crate) observer: Option<FaultObserverRef>,
}

impl UnitContext {
    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_group(Arc::clone(&self.group))
            .with_unit(self.unit)
    }
}

/// Runs `unit` to completion and reports its outcome exactly once.
pub(crate) async fn run_unit<F, Fut>(
    ctx: UnitContext,
    unit: F,
    permit: Option<OwnedSemaphorePermit>,
) where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), TaskError>>,
{
    ctx.bus.publish(ctx.event(EventKind::UnitStarting));

    let outcome = match AssertUnwindSafe(async move { unit().await })
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            ctx.bus.publish(ctx.event(EventKind::UnitSucceeded));
            Ok(())
        }
        Ok(Err(err)) => {
            ctx.bus
                .publish(ctx.event(EventKind::UnitFailed).with_reason(err.to_string()));
            Err(err)
        }
        Err(panic) => {
            let payload = panic_message(&*panic);
            if let Some(observer) = &ctx.observer {
                let fault = Fault::new(payload.clone()).in_unit(Arc::clone(&ctx.group), ctx.unit);
                // A panicking observer must not skip the record below.
                let _ = panic::catch_unwind(AssertUnwindSafe(|| observer.on_fault(&fault)));
            }
            ctx.bus
                .publish(ctx.event(EventKind::UnitPanicked).with_reason(payload.as_str()));
            Err(TaskError::Panic { payload })
        }
    };

    drop(permit);
    if ctx.state.record(outcome) {
        ctx.bus.publish(
            Event::new(EventKind::GroupDrained).with_group(Arc::clone(&ctx.group)),
        );
    }
}
