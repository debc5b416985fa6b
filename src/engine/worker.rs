// src/engine/worker.rs

//! The mission worker loop.
//!
//! Runs on its own thread, one thread per mission. Each iteration:
//! 1. marks the current task InProgress,
//! 2. sleeps one tick (no lock held),
//! 3. adds the wall-clock time since the last mark to the task's elapsed time,
//! 4. if paused, marks the task Paused and blocks on the resume gate,
//! 5. completes the task once its elapsed time exceeds the task duration.
//!
//! The stop flag is only looked at between iterations. After the loop the
//! robot "docks" for a fixed time and reports home.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::config::TimingConfig;
use crate::engine::signal::RunSignals;
use crate::engine::state::ExecutionState;
use crate::errors::{Result, RobotError};
use crate::mission::Mission;
use crate::types::{MissionStatus, StoppedMissionPolicy, TaskStatus};

pub(crate) struct Worker {
    pub mission: Arc<Mission>,
    pub signals: Arc<RunSignals>,
    pub state: Arc<ExecutionState>,
    pub timing: TimingConfig,
    pub policy: StoppedMissionPolicy,
}

/// Battery after `completed` of `total` tasks: drains linearly to 50%.
pub fn battery_after(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    100.0 * (1.0 - (completed as f64 / total as f64) / 2.0)
}

impl Worker {
    /// Thread entry point. Errors end the run without docking and leave the
    /// mission status untouched.
    pub fn run(self) {
        let mission_id = self.mission.id().to_string();
        if let Err(err) = self.execute() {
            error!(
                mission = %mission_id,
                error = %err,
                "mission execution aborted"
            );
        }
    }

    fn execute(&self) -> Result<()> {
        let tasks = self.mission.tasks();
        let task_count = tasks.len();
        if task_count == 0 {
            return Err(RobotError::EmptyMission(self.mission.id().to_string()));
        }

        let mut current = 0;
        let mut elapsed = Duration::ZERO;
        let mut mark = Instant::now();

        while !self.signals.stop.is_set() && current < task_count {
            let task = &tasks[current];
            task.set_status(TaskStatus::InProgress);

            thread::sleep(self.timing.tick);
            elapsed += mark.elapsed();

            if !self.signals.resume.is_set() {
                task.set_status(TaskStatus::Paused);
                info!(mission = %self.mission.id(), task = %task.id(), "mission paused");
                self.signals.resume.wait()?;
                task.set_status(TaskStatus::InProgress);
                info!(mission = %self.mission.id(), task = %task.id(), "mission resumed");
            }
            mark = Instant::now();

            if elapsed > self.timing.task_duration {
                elapsed = Duration::ZERO;
                task.set_status(TaskStatus::Successful);
                current += 1;

                let battery = battery_after(current, task_count);
                self.state.set_battery(battery);
                info!(
                    mission = %self.mission.id(),
                    task = %task.id(),
                    completed = current,
                    total = task_count,
                    battery,
                    "task completed"
                );
            }
        }

        let stopped = current < task_count;
        let final_status = self.finish(stopped, current);
        self.mission.set_status(final_status);
        info!(
            mission = %self.mission.id(),
            status = ?final_status,
            stopped,
            "mission loop ended; returning to dock"
        );

        thread::sleep(self.timing.docking_duration);
        self.state.set_home(true);
        info!(mission = %self.mission.id(), "mission finished; robot is home");

        Ok(())
    }

    /// Decide the mission status written on loop exit.
    fn finish(&self, stopped: bool, current: usize) -> MissionStatus {
        if !stopped || self.policy == StoppedMissionPolicy::Successful {
            return MissionStatus::Successful;
        }

        for task in &self.mission.tasks()[current..] {
            if !task.status().is_terminal() {
                task.set_status(TaskStatus::Cancelled);
                debug!(mission = %self.mission.id(), task = %task.id(), "task cancelled by stop");
            }
        }
        MissionStatus::Cancelled
    }
}
