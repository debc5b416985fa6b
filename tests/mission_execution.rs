// tests/mission_execution.rs

use std::time::Duration;

use eelink_sim::engine::battery_after;
use eelink_sim::robot::RobotInterface;
use eelink_sim::types::{MissionStatus, RobotStatus, TaskStatus};
use eelink_sim_test_utils::builders::{MissionBuilder, RobotBuilder};
use eelink_sim_test_utils::{init_tracing, wait_until};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const LIMIT: Duration = Duration::from_secs(5);

#[test]
fn mission_completes_all_tasks_in_order() -> TestResult {
    init_tracing();

    let robot = RobotBuilder::new().build();
    let mission = MissionBuilder::new("m-order").with_image_tasks(4).build();
    robot.initiate_mission(mission.clone())?;

    let mut completed: Vec<String> = Vec::new();
    let mut concurrent_violation = None;

    let docked = wait_until(LIMIT, || {
        // Read back to front: a task is never observed ahead of its predecessor.
        let mut snapshot: Vec<TaskStatus> =
            mission.tasks().iter().rev().map(|t| t.status()).collect();
        snapshot.reverse();

        let in_progress = snapshot
            .iter()
            .filter(|s| **s == TaskStatus::InProgress)
            .count();
        if in_progress > 1 {
            concurrent_violation = Some(snapshot.clone());
        }

        for (task, status) in mission.tasks().iter().zip(&snapshot) {
            if *status == TaskStatus::Successful && !completed.iter().any(|c| c == task.id()) {
                completed.push(task.id().to_string());
            }
        }

        robot.engine().is_home() && !robot.engine().is_running()
    });

    assert!(docked, "mission did not finish in time");
    assert_eq!(concurrent_violation, None);
    assert_eq!(completed, vec!["t0", "t1", "t2", "t3"]);
    assert_eq!(mission.status(), MissionStatus::Successful);
    assert_eq!(robot.mission_status("m-order")?, MissionStatus::Successful);
    assert_eq!(robot.robot_status()?, RobotStatus::Home);
    assert!(!robot.running()?);

    Ok(())
}

/// Task order must always look like: Successful*, at most one active
/// (InProgress or Paused) task, then NotStarted*.
fn well_formed(statuses: &[TaskStatus]) -> bool {
    let finished = statuses
        .iter()
        .take_while(|s| **s == TaskStatus::Successful)
        .count();
    let rest = &statuses[finished..];
    let rest = match rest.first() {
        Some(TaskStatus::InProgress) | Some(TaskStatus::Paused) => &rest[1..],
        _ => rest,
    };
    rest.iter().all(|s| *s == TaskStatus::NotStarted)
}

#[test]
fn later_tasks_wait_until_earlier_tasks_succeed() -> TestResult {
    init_tracing();

    let robot = RobotBuilder::new().build();
    let mission = MissionBuilder::new("m-seq").with_image_tasks(3).build();
    robot.initiate_mission(mission.clone())?;

    let mut malformed = Vec::new();
    let docked = wait_until(LIMIT, || {
        let mut statuses: Vec<TaskStatus> =
            mission.tasks().iter().rev().map(|t| t.status()).collect();
        statuses.reverse();
        if !well_formed(&statuses) {
            malformed.push(statuses);
        }
        robot.engine().is_home()
    });

    assert!(docked);
    assert!(malformed.is_empty(), "malformed snapshots: {malformed:?}");
    for task in mission.tasks() {
        assert_eq!(task.status(), TaskStatus::Successful, "task {}", task.id());
    }
    Ok(())
}

#[test]
fn battery_drains_linearly_to_half() -> TestResult {
    init_tracing();

    let robot = RobotBuilder::new().build();
    let mission = MissionBuilder::new("m-battery").with_image_tasks(4).build();
    robot.initiate_mission(mission.clone())?;
    assert_eq!(robot.battery_level()?, 100.0);

    let mut readings = vec![100.0];
    let docked = wait_until(LIMIT, || {
        let level = robot.engine().battery_level();
        if readings.last() != Some(&level) {
            readings.push(level);
        }
        robot.engine().is_home()
    });

    assert!(docked);
    assert_eq!(readings, vec![100.0, 87.5, 75.0, 62.5, 50.0]);
    assert!(readings.windows(2).all(|w| w[1] < w[0]));
    Ok(())
}

#[test]
fn battery_formula_never_drops_below_half() {
    for total in 1..20 {
        let mut previous = battery_after(0, total);
        assert_eq!(previous, 100.0);
        for completed in 1..=total {
            let level = battery_after(completed, total);
            assert!(level < previous);
            assert!(level >= 50.0);
            previous = level;
        }
        assert_eq!(previous, 50.0);
    }
}

#[test]
fn battery_resets_to_full_on_next_mission() -> TestResult {
    init_tracing();

    let robot = RobotBuilder::new().build();
    robot.initiate_mission(MissionBuilder::new("first").with_image_tasks(1).build())?;
    assert!(wait_until(LIMIT, || robot.engine().is_home()
        && !robot.engine().is_running()));
    assert_eq!(robot.battery_level()?, 50.0);

    robot.initiate_mission(MissionBuilder::new("second").with_image_tasks(2).build())?;
    assert_eq!(robot.battery_level()?, 100.0);
    assert!(!robot.is_home()?);

    assert!(wait_until(LIMIT, || robot.engine().is_home()
        && !robot.engine().is_running()));
    assert_eq!(robot.mission_status("second")?, MissionStatus::Successful);
    // Earlier missions stay queryable.
    assert_eq!(robot.mission_status("first")?, MissionStatus::Successful);
    Ok(())
}

#[test]
fn two_task_scenario_with_slow_timing() -> TestResult {
    init_tracing();

    let robot = RobotBuilder::new()
        .tick(Duration::from_millis(100))
        .task_duration(Duration::from_millis(500))
        .docking(Duration::from_millis(50))
        .build();
    let mission = MissionBuilder::new("m-two").with_image_tasks(2).build();
    robot.initiate_mission(mission.clone())?;

    assert!(wait_until(LIMIT, || robot.task_status("t0").ok()
        == Some(TaskStatus::Successful)));
    assert!(wait_until(Duration::from_millis(200), || {
        robot.task_status("t1").ok() == Some(TaskStatus::InProgress)
    }));
    assert_eq!(robot.battery_level()?, 75.0);

    assert!(wait_until(LIMIT, || robot.engine().is_home()
        && !robot.engine().is_running()));
    assert_eq!(mission.status(), MissionStatus::Successful);
    assert_eq!(robot.mission_status("m-two")?, MissionStatus::Successful);
    assert_eq!(robot.battery_level()?, 50.0);
    Ok(())
}

#[test]
fn empty_mission_aborts_without_docking() -> TestResult {
    init_tracing();

    let robot = RobotBuilder::new().build();
    let mission = MissionBuilder::new("m-empty").build();
    robot.initiate_mission(mission.clone())?;

    assert!(wait_until(LIMIT, || !robot.engine().is_running()));
    assert!(!robot.is_home()?);
    assert_eq!(mission.status(), MissionStatus::NotStarted);
    assert_eq!(robot.robot_status()?, RobotStatus::Available);
    Ok(())
}
