// tests/fault_injection.rs

use std::time::{Duration, Instant};

use eelink_sim::config::ApiConfig;
use eelink_sim::errors::RobotError;
use eelink_sim::robot::{RobotInterface, SimulatedApi};
use eelink_sim::types::RobotStatus;
use eelink_sim_test_utils::builders::{MissionBuilder, RobotBuilder};
use eelink_sim_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn failing() -> ApiConfig {
    ApiConfig {
        fail_probability: 1.0,
        ..ApiConfig::default()
    }
}

#[test]
fn perfect_link_never_fails() -> TestResult {
    let api = SimulatedApi::new(ApiConfig::default())?;
    for _ in 0..100 {
        api.call("robot_status")?;
    }
    Ok(())
}

#[test]
fn certain_failure_is_a_transient_error() {
    init_tracing();

    let robot = RobotBuilder::new().api(failing()).build();
    let err = robot.robot_status().unwrap_err();
    assert!(matches!(err, RobotError::CommunicationFailure), "got {err:?}");
    assert!(err.is_transient());

    assert!(matches!(
        robot.battery_level(),
        Err(RobotError::CommunicationFailure)
    ));
}

#[test]
fn certain_timeout_waits_before_failing() {
    init_tracing();

    let timeout = Duration::from_millis(20);
    let api = SimulatedApi::new(ApiConfig {
        timeout_probability: 1.0,
        timeout,
        ..ApiConfig::default()
    })
    .expect("valid api config");

    let start = Instant::now();
    let err = api.call("is_home").unwrap_err();
    assert!(start.elapsed() >= timeout);
    assert!(err.is_transient());
    match err {
        RobotError::CommunicationTimeout(after) => assert_eq!(after, timeout),
        other => panic!("expected CommunicationTimeout, got {other:?}"),
    }
}

#[test]
fn failure_is_drawn_before_timeout() {
    let api = SimulatedApi::new(ApiConfig {
        fail_probability: 1.0,
        timeout_probability: 1.0,
        timeout: Duration::from_secs(10),
        ..ApiConfig::default()
    })
    .expect("valid api config");

    let start = Instant::now();
    assert!(matches!(
        api.call("running"),
        Err(RobotError::CommunicationFailure)
    ));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn delay_applies_to_every_call() -> TestResult {
    let delay = Duration::from_millis(15);
    let api = SimulatedApi::new(ApiConfig {
        delay,
        ..ApiConfig::default()
    })?;

    let start = Instant::now();
    api.call("battery_level")?;
    api.call("battery_level")?;
    assert!(start.elapsed() >= delay * 2);
    Ok(())
}

#[test]
fn failed_initiate_does_not_start_the_engine() {
    init_tracing();

    let robot = RobotBuilder::new().api(failing()).build();
    let mission = MissionBuilder::new("m-lost").with_image_tasks(1).build();

    let err = robot.initiate_mission(mission).unwrap_err();
    assert!(err.is_transient(), "got {err:?}");
    assert!(!robot.engine().is_running());
    assert!(robot.engine().is_home());
    assert!(robot.engine().current_mission().is_none());
}

#[test]
fn precondition_errors_are_not_transient() {
    let robot = RobotBuilder::new().build();
    let err = robot.stop().unwrap_err();
    assert!(!err.is_transient());
    assert!(!RobotError::AlreadyHome.is_transient());
    assert!(!RobotError::MissionNotFound("m".into()).is_transient());
}

#[test]
fn seeded_draws_are_reproducible() {
    let config = ApiConfig {
        fail_probability: 0.5,
        seed: Some(7),
        ..ApiConfig::default()
    };
    let a = SimulatedApi::new(config.clone()).expect("valid api config");
    let b = SimulatedApi::new(config).expect("valid api config");

    let outcomes = |api: &SimulatedApi| -> Vec<bool> {
        (0..64).map(|_| api.call("robot_status").is_ok()).collect()
    };
    let first = outcomes(&a);
    let second = outcomes(&b);

    assert_eq!(first, second);
    assert!(first.iter().any(|ok| *ok));
    assert!(first.iter().any(|ok| !*ok));
}

#[test]
fn reconfigure_changes_fault_behaviour() -> TestResult {
    init_tracing();

    let mut robot = RobotBuilder::new().build();
    assert_eq!(robot.robot_status()?, RobotStatus::Home);

    robot.set_api_config(failing())?;
    assert_eq!(robot.api_config().fail_probability, 1.0);
    assert!(robot.robot_status().is_err());

    robot.set_api_config(ApiConfig::default())?;
    assert_eq!(robot.robot_status()?, RobotStatus::Home);
    Ok(())
}

#[test]
fn invalid_probability_is_rejected() {
    let mut robot = RobotBuilder::new().build();

    let err = robot
        .set_api_config(ApiConfig {
            fail_probability: 1.5,
            ..ApiConfig::default()
        })
        .unwrap_err();
    assert!(matches!(err, RobotError::ConfigError(_)), "got {err:?}");
    assert_eq!(robot.api_config(), &ApiConfig::default());

    assert!(SimulatedApi::new(ApiConfig {
        timeout_probability: -0.1,
        ..ApiConfig::default()
    })
    .is_err());
}
