//! Process runtime and OS-level concerns for procherd.
//!
//! procherd supervises a fixed pool of worker child processes from inside a
//! long-running daemon: it spawns the pool, restarts workers that crash,
//! optionally rotates them on a schedule to bound resource growth, and
//! shuts the pool down gracefully: SIGINT first, SIGKILL if a child will
//! not cooperate.
//!
//! The parent side is [`Manager`] plus [`Worker`]; the child side is the
//! [`child`] harness, which runs the embedding application's
//! [`Work`] capability in a cooperative loop. The two sides share nothing
//! but signals and exit statuses.
//!
//! Unix only: supervision is driven by SIGCHLD and `waitpid`.

pub mod child;
pub mod manager;
pub mod process;
pub mod signals;
pub mod worker;

// Re-export the domain surface so embedders can depend on one crate
pub use procherd_core::{
    ConfigError, SupervisorConfig, SupervisorError, Work, WorkerCommand, WorkerSpawner,
};

pub use manager::Manager;
pub use process::{
    CommandSpawner, HARD_SIGNAL, ProbeOutcome, SOFT_SIGNAL, SignalOutcome, probe, send_signal,
};
pub use signals::ControlHandle;
pub use worker::Worker;
