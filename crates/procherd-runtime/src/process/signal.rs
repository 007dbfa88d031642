//! Signal delivery to child processes.

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing::warn;

/// Signal requesting graceful shutdown; worker children interpret it
/// cooperatively, finishing the current work iteration first.
pub const SOFT_SIGNAL: Signal = Signal::SIGINT;

/// Unconditional termination signal, delivered without the target's
/// cooperation.
pub const HARD_SIGNAL: Signal = Signal::SIGKILL;

/// Outcome of delivering a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// The signal was delivered.
    Delivered,
    /// The OS has no record of the PID. Signalling an already-dead child
    /// is an expected outcome everywhere this is used, so this is a
    /// sentinel, not an error.
    NoSuchProcess,
}

/// Send `sig` to `pid`, swallowing the already-gone race.
pub fn send_signal(pid: u32, sig: Signal) -> SignalOutcome {
    match signal::kill(Pid::from_raw(pid as i32), sig) {
        Ok(()) => SignalOutcome::Delivered,
        Err(Errno::ESRCH) => SignalOutcome::NoSuchProcess,
        Err(err) => {
            // Only reachable for a PID we never spawned (EPERM); the child
            // is out of our reach either way.
            warn!(pid, %err, "signal delivery failed");
            SignalOutcome::NoSuchProcess
        }
    }
}
