//! # Example: basic_group
//!
//! Fans out a handful of units over an unbounded group and joins them.
//!
//! Shows how to:
//! - Submit closures returning `Result<(), TaskError>`.
//! - Let fail-fast admission skip work once a failure was observed.
//! - Read the success count and the combined error from [`TaskGroup::wait`].
//! - Guard a detached side task with [`spawn_guarded`].
//!
//! ## Run
//! ```bash
//! cargo run --example basic_group
//! ```

use std::sync::Arc;
use std::time::Duration;

use taskgroup::{Fault, FaultObserverRef, GroupConfig, TaskError, TaskGroup, spawn_guarded};

async fn fetch(id: u32) -> Result<(), TaskError> {
    tokio::time::sleep(Duration::from_millis(10 * u64::from(id))).await;
    match id {
        3 => Err(TaskError::fail(format!("fetch {id}: upstream returned 503"))),
        5 => panic!("fetch {id}: corrupted payload"),
        _ => {
            println!("fetch {id}: ok");
            Ok(())
        }
    }
}

async fn warm_cache() {
    panic!("cache warmer crashed");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let observer: FaultObserverRef = Arc::new(|fault: &Fault| {
        eprintln!(
            "[fault] group={} unit={} payload={}",
            fault.group.as_deref().unwrap_or("-"),
            fault.unit.unwrap_or(0),
            fault.payload
        );
    });

    let group = TaskGroup::builder(GroupConfig::default().with_name("fetch"))
        .with_fault_observer(Arc::clone(&observer))
        .build();

    // First wave: submitted together, all run even though #3 fails.
    for id in 1..=5 {
        group.submit(move || fetch(id)).await;
    }
    let (ok, err) = group.wait().await;
    println!("wave 1: {ok} succeeded");
    if let Some(err) = &err {
        println!("wave 1: {} failed ({} panicked): {err}", err.len(), err.panics());
    }

    // Second wave: a failure is already recorded, so fail-fast skips these.
    for id in 6..=8 {
        group.submit(move || fetch(id)).await;
    }
    let (ok, _) = group.wait().await;
    println!("after wave 2: {ok} succeeded, stats={:?}", group.stats());

    // A detached task outside any group; its panic goes to the same observer.
    let side = spawn_guarded(Some(observer), warm_cache());
    if let Ok(None) = side.await {
        println!("side task panicked, reported through the observer");
    }
}
