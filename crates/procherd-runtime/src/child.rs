//! Child-side work loop harness.
//!
//! Each spawned worker process runs this tiny state machine: run the setup
//! hook, install termination listeners that only flip a local flag, then
//! loop: exit gracefully once a termination request has been observed,
//! otherwise invoke the work capability once. The loop only notices a
//! request *between* invocations, which is why the contract on
//! [`Work::work`] demands bounded iterations.
//!
//! A worker binary embeds the harness like this:
//!
//! ```no_run
//! use async_trait::async_trait;
//! use procherd_core::Work;
//!
//! struct DrainQueue;
//!
//! #[async_trait]
//! impl Work for DrainQueue {
//!     async fn work(&mut self) {
//!         // take one job off the queue and process it
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), procherd_runtime::SupervisorError> {
//!     procherd_runtime::child::run(DrainQueue).await
//! }
//! ```

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use procherd_core::{SupervisorError, Work};
use tokio::signal::unix::{SignalKind, signal};
use tracing::info;

/// Run the work loop until a termination request is observed.
///
/// Call this from the worker binary's `main`; when it returns, the process
/// should exit 0. SIGINT and SIGTERM both make the loop finish the current
/// `work` invocation, run `teardown`, and return.
///
/// # Errors
///
/// `SupervisorError::SignalSetup` if the termination listeners cannot be
/// installed.
pub async fn run<W: Work>(mut work: W) -> Result<(), SupervisorError> {
    info!("worker child started");
    work.setup().await;

    let interrupted = install_termination_listeners()
        .map_err(|e| SupervisorError::SignalSetup(e.to_string()))?;

    work_loop(&interrupted, &mut work).await;
    Ok(())
}

/// Wire SIGINT and SIGTERM to a local flag. Signal context does nothing
/// else.
fn install_termination_listeners() -> io::Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));

    for kind in [SignalKind::interrupt(), SignalKind::terminate()] {
        let mut stream = signal(kind)?;
        let flag = Arc::clone(&interrupted);
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    Ok(interrupted)
}

async fn work_loop<W: Work>(interrupted: &AtomicBool, work: &mut W) {
    loop {
        if interrupted.load(Ordering::SeqCst) {
            info!("termination requested, exiting gracefully");
            work.teardown().await;
            return;
        }
        work.work().await;
    }
}
