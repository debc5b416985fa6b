// src/robot/mod.rs

//! Control surface of the simulated EeLink robot.
//!
//! - [`interface`] defines the `RobotInterface` contract used by callers.
//! - [`api`] simulates the faulty link every operation goes through.
//!
//! `Robot` checks preconditions (home, feasibility, running, paused) on the
//! caller's thread and forwards to the [`Engine`]. Rejected preconditions are
//! returned as typed errors; nothing is retried here.

pub mod api;
pub mod interface;

pub use api::SimulatedApi;
pub use interface::RobotInterface;

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::config::{ApiConfig, ConfigFile};
use crate::engine::Engine;
use crate::errors::{Result, RobotError};
use crate::mission::Mission;
use crate::types::{MissionStatus, RobotStatus, TaskKind, TaskStatus};

/// Simulated robot: a fault-injecting API in front of an execution engine.
pub struct Robot {
    api: SimulatedApi,
    engine: Engine,
}

impl fmt::Debug for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Robot")
            .field("api", self.api.config())
            .field("engine", &self.engine)
            .finish()
    }
}

impl Robot {
    pub fn new(api: SimulatedApi, engine: Engine) -> Self {
        info!("simulated EeLink robot ready");
        Self { api, engine }
    }

    /// Build a robot from a validated config file.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let api = SimulatedApi::new(cfg.api.clone())?;
        let engine = Engine::new(cfg.timing, cfg.mission.stopped_mission_status);
        Ok(Self::new(api, engine))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn api_config(&self) -> &ApiConfig {
        self.api.config()
    }

    /// Replace the fault-injection settings of this robot.
    pub fn set_api_config(&mut self, config: ApiConfig) -> Result<()> {
        self.api.reconfigure(config)
    }
}

impl RobotInterface for Robot {
    /// Accept-all policy: every mission is feasible.
    fn mission_feasible(&self, mission: &Mission) -> bool {
        info!(mission = %mission.id(), "mission_feasible called");
        true
    }

    fn initiate_mission(&self, mission: Arc<Mission>) -> Result<()> {
        info!(mission = %mission.id(), "initiate_mission called");

        if self.is_home()? && mission.first_kind() == Some(TaskKind::ReturnToHome) {
            return Err(RobotError::AlreadyHome);
        }
        if !self.mission_feasible(&mission) {
            return Err(RobotError::InfeasibleMission(mission.id().to_string()));
        }
        if self.running()? {
            let current = self
                .engine
                .current_mission()
                .map(|m| m.id().to_string())
                .unwrap_or_default();
            return Err(RobotError::AlreadyRunning(current));
        }

        self.api.call("initiate_mission")?;
        self.engine.start(mission)
    }

    fn mission_status(&self, mission_id: &str) -> Result<MissionStatus> {
        self.api.call("mission_status")?;
        self.engine.mission_status(mission_id)
    }

    fn task_status(&self, task_id: &str) -> Result<TaskStatus> {
        self.api.call("task_status")?;
        self.engine.task_status(task_id)
    }

    fn stop(&self) -> Result<()> {
        info!("stop called");

        if self.robot_status()? != RobotStatus::Busy {
            return Err(RobotError::NoMissionRunning);
        }

        self.api.call("stop")?;
        info!("Mission stopping");
        self.engine.request_stop();
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        info!("pause called");

        match self.robot_status()? {
            RobotStatus::Paused => return Err(RobotError::AlreadyPaused),
            RobotStatus::Busy => {}
            _ => return Err(RobotError::NoMissionRunning),
        }

        self.api.call("pause")?;
        info!("Pausing mission");
        self.engine.pause();
        Ok(())
    }

    fn resume(&self) -> Result<()> {
        info!("resume called");

        if self.robot_status()? != RobotStatus::Paused {
            return Err(RobotError::NotPaused);
        }

        self.api.call("resume")?;
        info!("Resuming mission");
        self.engine.resume();
        Ok(())
    }

    fn robot_status(&self) -> Result<RobotStatus> {
        self.api.call("robot_status")?;
        Ok(self.engine.robot_status())
    }

    fn battery_level(&self) -> Result<f64> {
        self.api.call("battery_level")?;
        Ok(self.engine.battery_level())
    }

    fn is_home(&self) -> Result<bool> {
        self.api.call("is_home")?;
        Ok(self.engine.is_home())
    }

    fn running(&self) -> Result<bool> {
        self.api.call("running")?;
        Ok(self.engine.is_running())
    }
}
