//! Worker lifecycle state machine.
//!
//! A worker owns one child process slot: Stopped → Running → Stopping →
//! Stopped. A crash is a Running → Stopped transition that never passed
//! through Stopping; the `stopping` flag is the only thing distinguishing
//! the two, and the manager's crash scan keys off it.

use std::sync::Arc;
use std::time::Duration;

use procherd_core::{SupervisorError, WorkerSpawner};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::process::{HARD_SIGNAL, ProbeOutcome, SOFT_SIGNAL, probe, send_signal};

/// Cadence of the soft-signal retry while waiting for a child to stop.
const STOP_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// One supervised child process slot.
pub struct Worker {
    pid: Option<u32>,
    stopping: bool,
    timeout: Duration,
    spawner: Arc<dyn WorkerSpawner>,
}

impl Worker {
    /// Create a worker slot. No process is spawned until [`Worker::start`].
    pub fn new(spawner: Arc<dyn WorkerSpawner>, timeout: Duration) -> Self {
        Self {
            pid: None,
            stopping: false,
            timeout,
            spawner,
        }
    }

    /// Last-known PID. Survives a crash, so the slot stays inspectable
    /// after its child is gone.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// True while a graceful stop is in flight or completed; cleared by the
    /// next start. A termination observed with this flag down is a crash.
    #[must_use]
    pub const fn stopping(&self) -> bool {
        self.stopping
    }

    /// Spawn a new child into this slot, overwriting any previous PID.
    pub fn start(&mut self) -> Result<(), SupervisorError> {
        self.stopping = false;
        let pid = self.spawner.spawn()?;
        self.pid = Some(pid);
        info!(pid, "worker started");
        Ok(())
    }

    /// Full respawn of the slot. No graceful stop is attempted first;
    /// callers stop cleanly before calling this when they need one. The
    /// manager only calls it on the crash path, where the old child is
    /// already gone.
    pub fn restart(&mut self) -> Result<(), SupervisorError> {
        self.start()
    }

    /// Probe the child, reaping it if it terminated. `None` if this slot
    /// never started.
    #[must_use]
    pub fn probe(&self) -> Option<ProbeOutcome> {
        self.pid.map(probe)
    }

    /// True if the slot has a PID and the process is observably alive.
    #[must_use]
    pub fn started(&self) -> bool {
        self.pid.is_some_and(|pid| probe(pid) == ProbeOutcome::Alive)
    }

    /// Inverse of [`Worker::started`].
    #[must_use]
    pub fn stopped(&self) -> bool {
        !self.started()
    }

    /// Begin a graceful stop: mark the slot stopping and send one soft
    /// signal. Returns false, doing nothing, if the slot is not started.
    /// Safe to call again while the child is still exiting.
    pub fn stop_without_wait(&mut self) -> bool {
        if !self.started() {
            debug!(pid = self.pid, "stop requested but worker is not started");
            return false;
        }

        // Tells the crash scan this termination is intentional.
        self.stopping = true;

        let Some(pid) = self.pid else { return false };
        debug!(pid, "sending soft stop signal");
        send_signal(pid, SOFT_SIGNAL);
        true
    }

    /// Graceful stop with escalation: the soft signal is re-sent once per
    /// second while the child stays alive, up to the stop timeout; then one
    /// hard kill and a final one-second grace period.
    ///
    /// Returns `Ok(false)` if the slot was not started, `Ok(true)` once the
    /// child is gone.
    ///
    /// # Errors
    ///
    /// [`SupervisorError::ChildNotStopped`] if the child is still
    /// observable after the hard kill. The caller must surface this to the
    /// operator.
    pub async fn stop_with_wait(&mut self) -> Result<bool, SupervisorError> {
        if !self.stop_without_wait() {
            return Ok(false);
        }

        let Some(pid) = self.pid else {
            return Ok(false);
        };
        debug!(pid, "waiting for child to stop");

        let timeout_secs = self.timeout.as_secs();
        let mut waited = 0;

        while waited < timeout_secs && probe(pid) == ProbeOutcome::Alive {
            sleep(STOP_POLL_INTERVAL).await;
            waited += 1;
            // Compensates for a dropped signal; delivery to an already-dead
            // child is swallowed.
            debug!(pid, attempt = waited, "re-sending soft stop signal");
            send_signal(pid, SOFT_SIGNAL);
        }

        if probe(pid) == ProbeOutcome::Alive {
            warn!(pid, timeout_secs, "child ignored soft stop, escalating to hard kill");
            send_signal(pid, HARD_SIGNAL);
            sleep(STOP_POLL_INTERVAL).await;
        }

        if probe(pid) == ProbeOutcome::Alive {
            return Err(SupervisorError::ChildNotStopped { pid });
        }

        info!(pid, "worker stopped");
        Ok(true)
    }
}
