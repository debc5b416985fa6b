// src/robot/interface.rs

//! Contract consumed by the mission-orchestration layer.
//!
//! The orchestration layer talks to a `RobotInterface` instead of a concrete
//! robot, so a real driver can replace the simulator without touching the
//! caller. [`Robot`](super::Robot) is the simulated implementation.

use std::sync::Arc;

use crate::errors::Result;
use crate::mission::Mission;
use crate::types::{MissionStatus, RobotStatus, TaskStatus};

pub trait RobotInterface: Send + Sync {
    /// Whether the robot can carry out the mission at all.
    fn mission_feasible(&self, mission: &Mission) -> bool;

    /// Start executing a mission. Returns as soon as the mission is running.
    fn initiate_mission(&self, mission: Arc<Mission>) -> Result<()>;

    fn mission_status(&self, mission_id: &str) -> Result<MissionStatus>;

    fn task_status(&self, task_id: &str) -> Result<TaskStatus>;

    /// Request the running mission to stop. The stop takes effect on the
    /// robot's next tick, not immediately.
    fn stop(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;

    fn resume(&self) -> Result<()>;

    fn robot_status(&self) -> Result<RobotStatus>;

    /// Battery level in percent.
    fn battery_level(&self) -> Result<f64>;

    fn is_home(&self) -> Result<bool>;

    fn running(&self) -> Result<bool>;
}
