//! Error taxonomy for the supervisor.
//!
//! Transient process-state races (a PID already reaped, a foreign PID we may
//! not inspect) are never errors; the runtime normalizes them to "exited,
//! status unknown". Only stop-escalation failures, spawn failures, and
//! construction-time configuration problems reach a caller.

use thiserror::Error;

/// Errors the supervisor raises to its caller.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// Spawning a worker child process failed.
    #[error("Failed to spawn worker process: {0}")]
    SpawnFailed(String),

    /// A child process was still alive one second after SIGKILL.
    ///
    /// This indicates an unkillable or zombie-producing child and must be
    /// surfaced to the operator, not silently retried.
    #[error("Unable to kill child process with PID {pid}")]
    ChildNotStopped {
        /// PID of the child that would not die.
        pid: u32,
    },

    /// One or more workers were still running after two-phase shutdown
    /// attempted every worker in the pool.
    #[error("Shutdown left {} worker(s) running: PIDs {pids:?}", pids.len())]
    ShutdownIncomplete {
        /// PIDs of the children that survived escalation.
        pids: Vec<u32>,
    },

    /// Installing the parent-side signal listeners failed.
    #[error("Failed to install signal listeners: {0}")]
    SignalSetup(String),

    /// Invalid construction-time configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration validation error.
///
/// Raised synchronously at construction time, never at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Restart interval must be a positive number of seconds")]
    ZeroRestartInterval,

    #[error("Stop timeout must be a positive number of seconds")]
    ZeroStopTimeout,

    #[error("Worker command program cannot be empty")]
    EmptyCommand,
}
