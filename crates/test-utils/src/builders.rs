#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use eelink_sim::config::{ApiConfig, ConfigFile, MissionSection, TimingConfig};
use eelink_sim::engine::Engine;
use eelink_sim::mission::{Mission, Task};
use eelink_sim::robot::{Robot, SimulatedApi};
use eelink_sim::types::{StoppedMissionPolicy, TaskKind};

/// Timing fast enough for tests: 5ms ticks, 40ms tasks, 30ms docking.
pub fn fast_timing() -> TimingConfig {
    TimingConfig {
        tick: Duration::from_millis(5),
        task_duration: Duration::from_millis(40),
        docking_duration: Duration::from_millis(30),
    }
}

/// Builder for `Mission` to simplify test setup.
pub struct MissionBuilder {
    id: String,
    tasks: Vec<Task>,
}

impl MissionBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, id: &str, kind: TaskKind) -> Self {
        self.tasks.push(Task::new(id, kind));
        self
    }

    /// Append `count` image tasks named `t0`, `t1`, ...
    pub fn with_image_tasks(mut self, count: usize) -> Self {
        let offset = self.tasks.len();
        for i in 0..count {
            self.tasks
                .push(Task::new(format!("t{}", offset + i), TaskKind::TakeImage));
        }
        self
    }

    pub fn build(self) -> Arc<Mission> {
        Arc::new(Mission::new(self.id, self.tasks))
    }
}

/// Builder for a simulated `Robot`.
pub struct RobotBuilder {
    api: ApiConfig,
    timing: TimingConfig,
    policy: StoppedMissionPolicy,
}

impl RobotBuilder {
    pub fn new() -> Self {
        Self {
            api: ApiConfig::default(),
            timing: fast_timing(),
            policy: StoppedMissionPolicy::default(),
        }
    }

    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn tick(mut self, tick: Duration) -> Self {
        self.timing.tick = tick;
        self
    }

    pub fn task_duration(mut self, duration: Duration) -> Self {
        self.timing.task_duration = duration;
        self
    }

    pub fn docking(mut self, duration: Duration) -> Self {
        self.timing.docking_duration = duration;
        self
    }

    pub fn stopped_policy(mut self, policy: StoppedMissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    pub fn config(&self) -> ConfigFile {
        ConfigFile {
            api: self.api.clone(),
            timing: self.timing,
            mission: MissionSection {
                stopped_mission_status: self.policy,
            },
        }
    }

    pub fn build(self) -> Robot {
        let api = SimulatedApi::new(self.api).expect("Failed to build simulated API from builder");
        Robot::new(api, Engine::new(self.timing, self.policy))
    }
}

impl Default for RobotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
