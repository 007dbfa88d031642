//! OS process primitives: the non-blocking probe, signal delivery, and the
//! default exec-based spawner.
//!
//! Everything here deals in raw PIDs. The supervisor never holds a `Child`
//! handle: children are identified by PID alone, signalled with `kill`, and
//! reaped through the probe's `WNOHANG` wait.

mod probe;
mod signal;
mod spawn;

pub use probe::{ProbeOutcome, probe};
pub use signal::{HARD_SIGNAL, SOFT_SIGNAL, SignalOutcome, send_signal};
pub use spawn::CommandSpawner;
