//! The supervision loop.
//!
//! One manager owns an ordered, fixed pool of workers and a single control
//! loop that multiplexes three concerns on a one-second tick, in priority
//! order: operator shutdown, crash detection and restart, scheduled
//! rotation. Signal listeners communicate with the loop exclusively
//! through the two control flags; the pool itself is touched by nothing
//! but the loop, so it needs no locking.

use std::sync::Arc;
use std::time::Duration;

use procherd_core::{SupervisorConfig, SupervisorError, WorkerSpawner};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use crate::process::{CommandSpawner, ProbeOutcome};
use crate::signals::{ControlHandle, install_listeners};
use crate::worker::Worker;

/// Control loop tick length.
const TICK: Duration = Duration::from_secs(1);

/// Supervises a fixed pool of worker child processes.
pub struct Manager {
    workers: Vec<Worker>,
    restart_after: Option<u64>,
    until_rotation: u64,
    rotation_cursor: usize,
    control: ControlHandle,
}

impl Manager {
    /// Build a manager whose workers exec the configured command.
    ///
    /// # Errors
    ///
    /// `SupervisorError::Config` when the configuration fails validation.
    pub fn new(config: SupervisorConfig) -> Result<Self, SupervisorError> {
        let spawner = Arc::new(CommandSpawner::new(config.command.clone()));
        Self::with_spawner(config, spawner)
    }

    /// Build a manager with an alternative spawning capability.
    pub fn with_spawner(
        config: SupervisorConfig,
        spawner: Arc<dyn WorkerSpawner>,
    ) -> Result<Self, SupervisorError> {
        config.validate()?;

        let timeout = Duration::from_secs(config.stop_timeout);
        let workers = (0..config.worker_count)
            .map(|_| Worker::new(Arc::clone(&spawner), timeout))
            .collect();

        Ok(Self {
            workers,
            restart_after: config.restart_after,
            until_rotation: config.restart_after.unwrap_or(0),
            rotation_cursor: 0,
            control: ControlHandle::new(),
        })
    }

    /// The worker pool, in rotation order.
    #[must_use]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// A handle to the control flags, for programmatic shutdown requests.
    #[must_use]
    pub fn control(&self) -> ControlHandle {
        self.control.clone()
    }

    /// Start every worker in order, install the signal listeners, and run
    /// the control loop until shutdown.
    ///
    /// Returns `Ok(())` after a clean operator-requested shutdown; the
    /// embedding binary then exits 0.
    ///
    /// # Errors
    ///
    /// A spawn failure while starting the pool, a listener installation
    /// failure, an escalation failure during a scheduled rotation, or an
    /// incomplete shutdown.
    pub async fn run(&mut self) -> Result<(), SupervisorError> {
        info!(worker_count = self.workers.len(), "starting worker pool");
        for worker in &mut self.workers {
            worker.start()?;
        }

        install_listeners(&self.control)
            .map_err(|e| SupervisorError::SignalSetup(e.to_string()))?;

        self.control_loop().await
    }

    async fn control_loop(&mut self) -> Result<(), SupervisorError> {
        let mut ticker = interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of an interval completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            // Shutdown outranks everything else within a tick.
            if self.control.interrupted() {
                info!("shutdown requested");
                return self.shutdown().await;
            }

            if self.control.take_child_exit() {
                self.restart_crashed();
            }

            self.tick_rotation().await?;
        }
    }

    /// Re-probe every worker after a SIGCHLD. Deliveries may be coalesced,
    /// so the scan never assumes which child exited.
    fn restart_crashed(&mut self) {
        for (index, worker) in self.workers.iter_mut().enumerate() {
            let Some(ProbeOutcome::Exited { code }) = worker.probe() else {
                continue;
            };

            if worker.stopping() {
                // Intentional termination; the stop path owns this slot.
                debug!(index, "worker exited during graceful stop");
                continue;
            }

            warn!(index, exit_code = ?code, "worker crashed, restarting");
            if let Err(err) = worker.restart() {
                // Leave the slot stopped; the next scan retries it.
                error!(index, %err, "failed to respawn crashed worker");
            }
        }
    }

    /// Count down to the next scheduled rotation and, when it fires,
    /// restart one worker, round robin from index 0.
    async fn tick_rotation(&mut self) -> Result<(), SupervisorError> {
        let Some(restart_after) = self.restart_after else {
            return Ok(());
        };

        self.until_rotation = self.until_rotation.saturating_sub(1);
        if self.until_rotation > 0 {
            return Ok(());
        }
        self.until_rotation = restart_after;

        let index = self.rotation_cursor;
        self.rotation_cursor = (self.rotation_cursor + 1) % self.workers.len();

        info!(index, "rotating worker on schedule");
        let worker = &mut self.workers[index];
        // An escalation failure here is fatal: an unkillable child must
        // reach the operator.
        worker.stop_with_wait().await?;
        worker.start()?;
        Ok(())
    }

    /// Two-phase shutdown: soft-signal every worker first, so all children
    /// begin exiting concurrently, then wait and escalate one at a time.
    /// Every worker is attempted even when one refuses to die; escalation
    /// failures are aggregated.
    ///
    /// # Errors
    ///
    /// `SupervisorError::ShutdownIncomplete` listing the PIDs that
    /// survived hard-kill escalation.
    pub async fn shutdown(&mut self) -> Result<(), SupervisorError> {
        for worker in &mut self.workers {
            worker.stop_without_wait();
        }

        let mut survivors = Vec::new();
        for (index, worker) in self.workers.iter_mut().enumerate() {
            match worker.stop_with_wait().await {
                Ok(_) => {}
                Err(SupervisorError::ChildNotStopped { pid }) => {
                    error!(index, pid, "worker survived hard kill");
                    survivors.push(pid);
                }
                Err(err) => return Err(err),
            }
        }

        if survivors.is_empty() {
            info!("all workers stopped");
            Ok(())
        } else {
            Err(SupervisorError::ShutdownIncomplete { pids: survivors })
        }
    }
}
