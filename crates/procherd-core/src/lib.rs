//! Core domain types and port definitions for the procherd supervisor.
//!
//! This crate holds everything the supervisor expects from the embedding
//! application, with no OS-level detail in any signature: construction-time
//! configuration, the error taxonomy, and the capability traits (ports) for
//! work execution and process spawning. The OS-facing implementation lives
//! in `procherd-runtime`.

pub mod config;
pub mod error;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{DEFAULT_STOP_TIMEOUT_SECS, DEFAULT_WORKER_COUNT, SupervisorConfig};
pub use error::{ConfigError, SupervisorError};
pub use ports::{Work, WorkerCommand, WorkerSpawner};
