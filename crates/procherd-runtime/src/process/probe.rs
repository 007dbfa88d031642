//! Non-blocking child process probe.
//!
//! The probe answers whether a child has terminated, without blocking, and
//! reaps the child in the same motion so no zombie outlives a probe.
//! Process-state races (PID already reaped, no child record left, no
//! permission to inspect) all collapse into "exited, status unknown":
//! under concurrent reaping those are expected outcomes, not errors.

use nix::errno::Errno;
use nix::sys::signal;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use tracing::debug;

/// Outcome of probing a child PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The process is still running.
    Alive,
    /// The process has terminated. `code` is the exit code when the OS
    /// reported one; `None` when the status is unknown: already reaped,
    /// killed by a signal, or no longer inspectable.
    Exited { code: Option<i32> },
}

impl ProbeOutcome {
    /// True if the probe saw a terminated process.
    #[must_use]
    pub const fn is_exited(self) -> bool {
        matches!(self, Self::Exited { .. })
    }
}

/// Probe a child PID with a non-blocking reap.
///
/// A null-signal existence check runs first: if the OS has no record of
/// the PID, or we may not inspect it, the child exited and someone else
/// collected the status. Otherwise the reap is attempted with `WNOHANG`.
#[must_use]
pub fn probe(pid: u32) -> ProbeOutcome {
    let pid = Pid::from_raw(pid as i32);

    if let Err(Errno::ESRCH | Errno::EPERM) = signal::kill(pid, None) {
        return ProbeOutcome::Exited { code: None };
    }

    match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
        Ok(WaitStatus::StillAlive) => ProbeOutcome::Alive,
        Ok(WaitStatus::Exited(_, code)) => ProbeOutcome::Exited { code: Some(code) },
        Ok(WaitStatus::Signaled(_, sig, _)) => {
            debug!(pid = pid.as_raw(), signal = %sig, "child terminated by signal");
            ProbeOutcome::Exited { code: None }
        }
        // Stopped or continued children still hold the slot.
        Ok(_) => ProbeOutcome::Alive,
        // ECHILD: no child record left. It exited, but the status is gone.
        Err(_) => ProbeOutcome::Exited { code: None },
    }
}
