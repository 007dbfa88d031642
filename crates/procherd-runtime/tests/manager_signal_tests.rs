//! Real-signal shutdown of a running manager.
//!
//! This file holds a single test on purpose: it raises SIGTERM against the
//! whole test process, which any other concurrently running manager in the
//! same binary would also observe.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use procherd_runtime::{
    CommandSpawner, Manager, SupervisorConfig, SupervisorError, WorkerCommand, WorkerSpawner,
    probe,
};

struct RecordingSpawner {
    inner: CommandSpawner,
    pids: Arc<Mutex<Vec<u32>>>,
}

impl WorkerSpawner for RecordingSpawner {
    fn spawn(&self) -> Result<u32, SupervisorError> {
        let pid = self.inner.spawn()?;
        self.pids.lock().unwrap().push(pid);
        Ok(pid)
    }
}

#[tokio::test]
async fn sigterm_drives_a_clean_two_phase_shutdown() {
    let command = WorkerCommand::new("sleep").with_args(["30"]);
    let pids = Arc::new(Mutex::new(Vec::new()));
    let spawner = RecordingSpawner {
        inner: CommandSpawner::new(command.clone()),
        pids: Arc::clone(&pids),
    };

    let config = SupervisorConfig::new(command)
        .with_worker_count(2)
        .with_stop_timeout(5);
    let mut manager = Manager::with_spawner(config, Arc::new(spawner)).expect("manager");

    let task = tokio::spawn(async move { manager.run().await });

    // Wait for the pool to come up before delivering the signal.
    let mut up = false;
    for _ in 0..100 {
        let snapshot = pids.lock().unwrap().clone();
        if snapshot.len() == 2 && snapshot.iter().all(|&pid| !probe(pid).is_exited()) {
            up = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(up, "pool did not come up");

    nix::sys::signal::raise(nix::sys::signal::Signal::SIGTERM).expect("raise SIGTERM");

    let result = tokio::time::timeout(Duration::from_secs(20), task)
        .await
        .expect("manager did not shut down after SIGTERM")
        .expect("task panicked");
    assert!(result.is_ok());

    for pid in pids.lock().unwrap().iter() {
        assert!(probe(*pid).is_exited());
    }
}
