//! Parent-side signal plumbing.
//!
//! The only cross-context mutation point in the supervisor: the signal
//! listeners flip one of two atomic flags and do nothing else in
//! signal-handling context (in particular no logging and no allocation).
//! The control loop reads and clears the flags on its own schedule.
//! Coalesced deliveries are tolerated because the crash scan always
//! re-probes every worker, no matter how many SIGCHLDs actually arrived.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::signal::unix::{Signal, SignalKind, signal};

/// Shared handle to the control flags.
///
/// Clones share the same flags. The manager polls them once per tick;
/// embedders and tests may use a clone to request shutdown
/// programmatically instead of delivering a real signal.
#[derive(Debug, Clone, Default)]
pub struct ControlHandle {
    interrupted: Arc<AtomicBool>,
    child_exited: Arc<AtomicBool>,
}

impl ControlHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request supervisor shutdown, as SIGINT or SIGTERM would.
    pub fn request_shutdown(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// True once shutdown has been requested. Never cleared; shutdown is
    /// one-way.
    #[must_use]
    pub fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Record that some child terminated, as SIGCHLD would.
    pub fn note_child_exit(&self) {
        self.child_exited.store(true, Ordering::SeqCst);
    }

    /// Consume the child-exit flag. Returns true at most once per set.
    #[must_use]
    pub fn take_child_exit(&self) -> bool {
        self.child_exited.swap(false, Ordering::SeqCst)
    }
}

/// Install the parent-side listeners: SIGINT and SIGTERM request shutdown,
/// SIGCHLD marks a child exit.
pub fn install_listeners(handle: &ControlHandle) -> io::Result<()> {
    let shutdown = handle.clone();
    watch(signal(SignalKind::interrupt())?, move || {
        shutdown.request_shutdown();
    });

    let shutdown = handle.clone();
    watch(signal(SignalKind::terminate())?, move || {
        shutdown.request_shutdown();
    });

    let children = handle.clone();
    watch(signal(SignalKind::child())?, move || {
        children.note_child_exit();
    });

    Ok(())
}

fn watch<F>(mut stream: Signal, mark: F)
where
    F: Fn() + Send + 'static,
{
    tokio::spawn(async move {
        while stream.recv().await.is_some() {
            mark();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_flags() {
        let handle = ControlHandle::new();
        let clone = handle.clone();

        assert!(!handle.interrupted());
        clone.request_shutdown();
        assert!(handle.interrupted());
    }

    #[test]
    fn child_exit_flag_is_consumed_on_read() {
        let handle = ControlHandle::new();

        assert!(!handle.take_child_exit());
        handle.note_child_exit();
        handle.note_child_exit(); // coalesced deliveries collapse
        assert!(handle.take_child_exit());
        assert!(!handle.take_child_exit());
    }

    #[tokio::test]
    async fn sigchld_sets_the_child_exit_flag() {
        let handle = ControlHandle::new();
        install_listeners(&handle).expect("install listeners");

        nix::sys::signal::raise(nix::sys::signal::Signal::SIGCHLD).expect("raise SIGCHLD");

        for _ in 0..50 {
            if handle.take_child_exit() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("SIGCHLD was not observed");
    }
}
