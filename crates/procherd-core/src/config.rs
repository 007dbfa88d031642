//! Supervisor construction-time configuration and validation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ports::WorkerCommand;

/// Default number of worker child processes.
pub const DEFAULT_WORKER_COUNT: usize = 1;

/// Default seconds to wait for a child to honor the soft stop signal before
/// escalating to a hard kill.
pub const DEFAULT_STOP_TIMEOUT_SECS: u64 = 60;

/// Construction-time configuration for a supervisor.
///
/// This is an intent-based configuration: it expresses what the caller
/// wants supervised, not how the pool is driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Command each worker child process runs.
    pub command: WorkerCommand,

    /// Number of worker child processes to keep alive.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// If set, one worker is restarted after this many seconds, round robin
    /// across the pool. `None` (the default) disables scheduled rotation.
    /// Useful to bound resource growth in leaky workers.
    #[serde(default)]
    pub restart_after: Option<u64>,

    /// Seconds to wait for a child after the soft stop signal before
    /// escalating to a hard kill.
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout: u64,
}

const fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

const fn default_stop_timeout() -> u64 {
    DEFAULT_STOP_TIMEOUT_SECS
}

impl SupervisorConfig {
    /// Create a configuration with required fields and defaults.
    #[must_use]
    pub const fn new(command: WorkerCommand) -> Self {
        Self {
            command,
            worker_count: DEFAULT_WORKER_COUNT,
            restart_after: None,
            stop_timeout: DEFAULT_STOP_TIMEOUT_SECS,
        }
    }

    /// Set the number of worker child processes.
    #[must_use]
    pub const fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Enable scheduled rotation: restart one worker every `seconds`.
    #[must_use]
    pub const fn with_restart_after(mut self, seconds: u64) -> Self {
        self.restart_after = Some(seconds);
        self
    }

    /// Set the per-worker stop timeout in seconds.
    #[must_use]
    pub const fn with_stop_timeout(mut self, seconds: u64) -> Self {
        self.stop_timeout = seconds;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.program.trim().is_empty() {
            return Err(ConfigError::EmptyCommand);
        }

        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }

        // Zero would fire a rotation on every tick; disabled is `None`.
        if self.restart_after == Some(0) {
            return Err(ConfigError::ZeroRestartInterval);
        }

        if self.stop_timeout == 0 {
            return Err(ConfigError::ZeroStopTimeout);
        }

        Ok(())
    }
}
