//! Integration tests for the public configuration surface.
//!
//! Exercises the re-exported types the way an embedding application would,
//! including serde round trips of a full supervisor configuration.

use procherd_core::{
    ConfigError, DEFAULT_STOP_TIMEOUT_SECS, SupervisorConfig, SupervisorError, WorkerCommand,
};

#[test]
fn full_config_round_trips_through_json() {
    let config = SupervisorConfig::new(
        WorkerCommand::new("queue-consumer")
            .with_args(["--batch-size", "50"])
            .with_env("RUST_LOG", "queue_consumer=debug"),
    )
    .with_worker_count(3)
    .with_restart_after(1800);

    let json = serde_json::to_string(&config).expect("serialize");
    let back: SupervisorConfig = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back.worker_count, 3);
    assert_eq!(back.restart_after, Some(1800));
    assert_eq!(back.stop_timeout, DEFAULT_STOP_TIMEOUT_SECS);
    assert_eq!(back.command.program, "queue-consumer");
    assert!(back.validate().is_ok());
}

#[test]
fn missing_optional_fields_use_defaults() {
    let json = r#"{"command": {"program": "worker-bin"}}"#;
    let config: SupervisorConfig = serde_json::from_str(json).expect("deserialize");

    assert_eq!(config.worker_count, 1);
    assert_eq!(config.restart_after, None);
    assert_eq!(config.stop_timeout, DEFAULT_STOP_TIMEOUT_SECS);
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_configs_fail_validation_before_any_process_work() {
    let zero_rotation = SupervisorConfig::new(WorkerCommand::new("w")).with_restart_after(0);
    assert_eq!(
        zero_rotation.validate(),
        Err(ConfigError::ZeroRestartInterval)
    );

    let zero_workers = SupervisorConfig::new(WorkerCommand::new("w")).with_worker_count(0);
    assert_eq!(zero_workers.validate(), Err(ConfigError::NoWorkers));
}

#[test]
fn config_errors_surface_through_the_supervisor_error_channel() {
    let err: SupervisorError = ConfigError::ZeroRestartInterval.into();
    assert!(
        err.to_string()
            .contains("positive number of seconds")
    );
}
