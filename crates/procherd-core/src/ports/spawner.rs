//! Worker process spawning port.
//!
//! Spawning is a capability supplied to the supervisor so that worker
//! lifecycle logic stays independent of how child processes come to be,
//! and mockable in tests. The default exec-based implementation lives in
//! `procherd-runtime`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SupervisorError;

/// Exec specification for a worker child process.
///
/// This is what the embedding application would otherwise hand to a worker
/// constructor: the program to run plus its arguments and environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerCommand {
    /// Program to execute.
    pub program: String,

    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment variables set in the child.
    #[serde(default)]
    pub env: Vec<(String, String)>,

    /// Working directory for the child (inherited if `None`).
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl WorkerCommand {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Append arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable in the child.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the child working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Capability for spawning one worker child process.
///
/// Implementations return the PID of the spawned child; the supervisor owns
/// all signalling and reaping from that point on.
pub trait WorkerSpawner: Send + Sync {
    /// Spawn a new child process and return its PID.
    fn spawn(&self) -> Result<u32, SupervisorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_args_and_env() {
        let command = WorkerCommand::new("consumer")
            .with_args(["--queue", "payments"])
            .with_env("RUST_LOG", "info")
            .with_cwd("/var/lib/consumer");

        assert_eq!(command.program, "consumer");
        assert_eq!(command.args, vec!["--queue", "payments"]);
        assert_eq!(
            command.env,
            vec![("RUST_LOG".to_string(), "info".to_string())]
        );
        assert_eq!(command.cwd, Some(PathBuf::from("/var/lib/consumer")));
    }

    #[test]
    fn test_serde_round_trip() {
        let command = WorkerCommand::new("consumer").with_args(["-v"]);
        let json = serde_json::to_string(&command).expect("serialize");
        let back: WorkerCommand = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.program, command.program);
        assert_eq!(back.args, command.args);
    }
}
