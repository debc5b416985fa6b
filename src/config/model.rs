// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::StoppedMissionPolicy;

/// Simulator configuration exactly as read from a TOML file.
///
/// ```toml
/// [api]
/// delay = "0ms"
/// fail_probability = 0.0
/// timeout_probability = 0.0
/// timeout = "0s"
///
/// [timing]
/// tick = "250ms"
/// task_duration = "10s"
/// docking_duration = "5s"
///
/// [mission]
/// stopped_mission_status = "successful"
/// ```
///
/// All sections are optional. Durations stay as strings until validation
/// turns this into a [`ConfigFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub api: RawApiSection,

    #[serde(default)]
    pub timing: RawTimingSection,

    #[serde(default)]
    pub mission: MissionSection,
}

/// `[api]` section: fault injection for every simulated API call.
#[derive(Debug, Clone, Deserialize)]
pub struct RawApiSection {
    /// Fixed delay before each call proceeds.
    #[serde(default = "zero_duration")]
    pub delay: String,

    /// Chance (0..=1) that a call fails with a communication error.
    #[serde(default)]
    pub fail_probability: f64,

    /// Chance (0..=1) that a call sleeps `timeout` and then times out.
    #[serde(default)]
    pub timeout_probability: f64,

    #[serde(default = "zero_duration")]
    pub timeout: String,

    /// Seed for the fault draws. Unseeded robots draw from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RawApiSection {
    fn default() -> Self {
        Self {
            delay: zero_duration(),
            fail_probability: 0.0,
            timeout_probability: 0.0,
            timeout: zero_duration(),
            seed: None,
        }
    }
}

/// `[timing]` section: pacing of the simulated mission.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTimingSection {
    #[serde(default = "default_tick")]
    pub tick: String,

    #[serde(default = "default_task_duration")]
    pub task_duration: String,

    #[serde(default = "default_docking_duration")]
    pub docking_duration: String,
}

impl Default for RawTimingSection {
    fn default() -> Self {
        Self {
            tick: default_tick(),
            task_duration: default_task_duration(),
            docking_duration: default_docking_duration(),
        }
    }
}

/// `[mission]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MissionSection {
    #[serde(default)]
    pub stopped_mission_status: StoppedMissionPolicy,
}

fn zero_duration() -> String {
    "0ms".to_string()
}

fn default_tick() -> String {
    "250ms".to_string()
}

fn default_task_duration() -> String {
    "10s".to_string()
}

fn default_docking_duration() -> String {
    "5s".to_string()
}

/// Validated simulator configuration.
///
/// Built from a [`RawConfigFile`] via `TryFrom`, or from defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub api: ApiConfig,
    pub timing: TimingConfig,
    pub mission: MissionSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        api: ApiConfig,
        timing: TimingConfig,
        mission: MissionSection,
    ) -> Self {
        Self {
            api,
            timing,
            mission,
        }
    }
}

/// Fault-injection settings for the simulated API.
///
/// Defaults to a perfect link: no delay, no failures, no timeouts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiConfig {
    pub delay: Duration,
    pub fail_probability: f64,
    pub timeout_probability: f64,
    pub timeout: Duration,
    pub seed: Option<u64>,
}

/// Pacing of the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Sleep between two iterations of the worker loop.
    pub tick: Duration,
    /// Accumulated running time after which the current task succeeds.
    pub task_duration: Duration,
    /// Simulated travel back to the dock once the loop ends.
    pub docking_duration: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            task_duration: Duration::from_secs(10),
            docking_duration: Duration::from_secs(5),
        }
    }
}
