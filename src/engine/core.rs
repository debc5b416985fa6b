// src/engine/core.rs

//! The execution engine: one per robot, at most one mission at a time.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::config::TimingConfig;
use crate::engine::aggregate::{aggregate_status, StatusVerdict};
use crate::engine::state::ExecutionState;
use crate::engine::worker::Worker;
use crate::errors::{Result, RobotError};
use crate::mission::Mission;
use crate::types::{MissionStatus, RobotStatus, StoppedMissionPolicy, TaskStatus};

/// Owns every mission-run field of one simulated robot.
///
/// The engine never blocks its caller: mission progression happens on a
/// worker thread created fresh for each mission. The caller only flips the
/// run signals and reads shared state.
pub struct Engine {
    timing: TimingConfig,
    policy: StoppedMissionPolicy,
    state: Arc<ExecutionState>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("timing", &self.timing)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(timing: TimingConfig, policy: StoppedMissionPolicy) -> Self {
        Self {
            timing,
            policy,
            state: Arc::new(ExecutionState::new()),
            worker: Mutex::new(None),
        }
    }

    /// Start executing `mission` on a new worker thread.
    ///
    /// Resets the run signals, the battery and the home flag before the
    /// worker starts, and restores them if the thread cannot be spawned.
    pub fn start(&self, mission: Arc<Mission>) -> Result<()> {
        let mut worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        if worker.as_ref().is_some_and(|h| !h.is_finished()) {
            let current = self
                .state
                .current_mission()
                .map(|m| m.id().to_string())
                .unwrap_or_default();
            return Err(RobotError::AlreadyRunning(current));
        }

        let (signals, checkpoint) = self.state.begin_run(Arc::clone(&mission));
        let run = Worker {
            mission: Arc::clone(&mission),
            signals,
            state: Arc::clone(&self.state),
            timing: self.timing,
            policy: self.policy,
        };

        let spawned = thread::Builder::new()
            .name("eelink-mission".to_string())
            .spawn(move || run.run());
        match spawned {
            Ok(handle) => *worker = Some(handle),
            Err(err) => {
                self.state.roll_back(checkpoint);
                warn!(mission = %mission.id(), error = %err, "failed to spawn mission worker");
                return Err(err.into());
            }
        }

        info!(mission = %mission.id(), tasks = mission.tasks().len(), "Starting mission");
        Ok(())
    }

    /// Whether the worker thread of the latest mission is still alive.
    pub fn is_running(&self) -> bool {
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn is_home(&self) -> bool {
        self.state.is_home()
    }

    pub fn battery_level(&self) -> f64 {
        self.state.battery()
    }

    /// `false` while the current run is paused.
    pub fn resume_signal_set(&self) -> bool {
        self.state.signals().resume.is_set()
    }

    pub fn current_mission(&self) -> Option<Arc<Mission>> {
        self.state.current_mission()
    }

    pub fn mission(&self, mission_id: &str) -> Option<Arc<Mission>> {
        self.state.mission(mission_id)
    }

    /// Paused, then Home, then Busy, then Available.
    pub fn robot_status(&self) -> RobotStatus {
        if !self.resume_signal_set() {
            RobotStatus::Paused
        } else if self.is_home() {
            RobotStatus::Home
        } else if self.is_running() {
            RobotStatus::Busy
        } else {
            RobotStatus::Available
        }
    }

    /// Clear the resume gate; the worker parks on its next tick.
    pub fn pause(&self) {
        debug!("clearing resume signal");
        self.state.signals().resume.clear();
    }

    pub fn resume(&self) {
        debug!("setting resume signal");
        self.state.signals().resume.set();
    }

    /// Request a cooperative stop, observed at the next loop iteration.
    pub fn request_stop(&self) {
        debug!("setting stop signal");
        self.state.signals().stop.set();
    }

    /// Aggregate status of `mission_id`.
    ///
    /// The current mission is aggregated with the live resume signal and
    /// worker liveness. Earlier missions have no live signals and are
    /// aggregated as resumed with no worker.
    pub fn mission_status(&self, mission_id: &str) -> Result<MissionStatus> {
        let (mission, resume_set, worker_alive) = match self.state.current_mission() {
            Some(current) if current.id() == mission_id => {
                (current, self.resume_signal_set(), self.is_running())
            }
            _ => {
                let past = self
                    .state
                    .mission(mission_id)
                    .ok_or_else(|| RobotError::MissionNotFound(mission_id.to_string()))?;
                (past, true, false)
            }
        };

        match aggregate_status(&mission.task_statuses(), resume_set, worker_alive) {
            StatusVerdict::Resolved(status) => Ok(status),
            StatusVerdict::Indeterminate => Err(RobotError::MissionStatusIndeterminate(
                mission_id.to_string(),
            )),
        }
    }

    /// Status of a task of the current mission.
    pub fn task_status(&self, task_id: &str) -> Result<TaskStatus> {
        self.state
            .current_mission()
            .and_then(|mission| mission.task(task_id).map(|task| task.status()))
            .ok_or_else(|| RobotError::TaskNotFound(task_id.to_string()))
    }
}
