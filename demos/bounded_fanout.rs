//! # Example: bounded_fanout
//!
//! Processes a batch with at most three units in flight and logs every
//! lifecycle event through the built-in [`LogWriter`].
//!
//! Shows how to:
//! - Bound concurrency with `GroupConfig::max_concurrent`.
//! - Keep launching after failures with `admit_after_failure`.
//! - Return `anyhow` errors from units (context chain is preserved).
//! - Record only the first error with [`OnceError`].
//!
//! ## Run
//! ```bash
//! RUST_LOG=taskgroup=debug cargo run --example bounded_fanout --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use taskgroup::{GroupConfig, LogWriter, OnceError, TaskError, TaskGroup};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

async fn resize(item: usize) -> anyhow::Result<()> {
    tokio::time::sleep(Duration::from_millis(40)).await;
    if item % 4 == 0 {
        bail!("unsupported color profile");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cfg = GroupConfig::default()
        .with_name("resize")
        .with_max_concurrent(3)
        .with_admit_after_failure(true);
    let group = TaskGroup::builder(cfg)
        .with_subscriber(Arc::new(LogWriter::new()))
        .build();
    let first = Arc::new(OnceError::new());

    for item in 1..=10 {
        let first = Arc::clone(&first);
        group
            .submit(move || async move {
                resize(item)
                    .await
                    .with_context(|| format!("image {item}"))
                    .map_err(|err| {
                        let err = TaskError::from(err);
                        first.set(err.clone());
                        err
                    })
            })
            .await;
    }

    let (ok, err) = group.wait().await;
    tracing::info!(succeeded = ok, failed = err.as_ref().map_or(0, |e| e.len()), "batch done");
    if let Some(first) = first.get() {
        tracing::warn!(%first, "first failure");
    }
    if let Some(err) = err {
        tracing::warn!(%err, "all failures");
    }

    // Let the subscriber worker flush before the runtime shuts down.
    tokio::time::sleep(Duration::from_millis(50)).await;
}
