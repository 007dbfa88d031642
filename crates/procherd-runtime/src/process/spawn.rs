//! Default exec-based worker spawner.

use std::process::{Command, Stdio};

use procherd_core::{SupervisorError, WorkerCommand, WorkerSpawner};
use tracing::debug;

/// Spawns worker children by exec'ing a configured command.
///
/// The `Child` handle is dropped as soon as the PID is read: the
/// supervisor tracks children by PID alone, and reaping happens
/// exclusively through the probe.
#[derive(Debug, Clone)]
pub struct CommandSpawner {
    command: WorkerCommand,
}

impl CommandSpawner {
    /// Create a spawner for `command`.
    #[must_use]
    pub const fn new(command: WorkerCommand) -> Self {
        Self { command }
    }
}

impl WorkerSpawner for CommandSpawner {
    fn spawn(&self) -> Result<u32, SupervisorError> {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args).stdin(Stdio::null());

        for (key, value) in &self.command.env {
            cmd.env(key, value);
        }

        if let Some(cwd) = &self.command.cwd {
            cmd.current_dir(cwd);
        }

        let child = cmd
            .spawn()
            .map_err(|e| SupervisorError::SpawnFailed(format!("{}: {e}", self.command.program)))?;

        let pid = child.id();
        debug!(pid, program = %self.command.program, "spawned worker child");
        Ok(pid)
    }
}
