//! # Guarded detached spawns.
//!
//! Helpers for firing off a future on its own Tokio task without letting a panic
//! vanish silently:
//!
//! - [`spawn_guarded`]: runs the future, catches a panic and hands it to the observer.
//! - [`spawn_with_callback`]: same, and always runs a completion callback afterwards,
//!   whether the future finished normally or panicked.
//!
//! ```text
//! spawn_guarded(observer, fut)
//!     └─► tokio::spawn ─► catch_unwind(fut)
//!                              ├─ Ok(v)    ─► Some(v)
//!                              └─ panic    ─► observer.on_fault(..) ─► None
//!
//! spawn_with_callback(observer, fut, done)
//!     └─► tokio::spawn ─► catch_unwind(fut) ─► done() ─► [observer on panic]
//! ```
//!
//! Both must be called from within a Tokio runtime.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::error::TaskError;
use crate::observer::{Fault, FaultObserverRef};

/// Spawns `fut` on a new task and captures a panic instead of losing it.
///
/// The handle resolves to `Some(output)` on normal completion and `None` if the
/// future panicked. The panic is reported to `observer` (if any) before the task ends.
///
/// # Example
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ok = taskgroup::spawn_guarded(None, async { 40 + 2 });
/// assert_eq!(ok.await.unwrap(), Some(42));
/// # }
/// ```
pub fn spawn_guarded<F>(
    observer: Option<FaultObserverRef>,
    fut: F,
) -> JoinHandle<Option<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(async move {
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(out) => Some(out),
            Err(panic) => {
                report(observer.as_ref(), &*panic);
                None
            }
        }
    })
}

/// Spawns `fut` and always runs `callback` once it is over, panic or not.
///
/// Ordering on panic: the callback runs first, then the observer is notified.
/// A panic inside the callback itself is not caught.
pub fn spawn_with_callback<F, C>(
    observer: Option<FaultObserverRef>,
    fut: F,
    callback: C,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
    C: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        let res = AssertUnwindSafe(fut).catch_unwind().await;
        callback();
        if let Err(panic) = res {
            report(observer.as_ref(), &*panic);
        }
    })
}

fn report(observer: Option<&FaultObserverRef>, panic: &(dyn Any + Send)) {
    if let Some(observer) = observer {
        observer.on_fault(&Fault::new(panic_message(panic)));
    }
}

/// Renders a panic payload as text.
///
/// `panic!("literal")` carries a `&'static str`, formatted panics carry a `String`.
/// `std::panic::panic_any` with a [`TaskError`] or an [`anyhow::Error`] is rendered
/// through `Display`. Any other payload type cannot be formatted and becomes
/// `"unknown panic"`.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(err) = panic.downcast_ref::<TaskError>() {
        err.to_string()
    } else if let Some(err) = panic.downcast_ref::<anyhow::Error>() {
        format!("{err:#}")
    } else {
        "unknown panic".to_string()
    }
}
