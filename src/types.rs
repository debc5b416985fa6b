// src/types.rs

use std::fmt;

use serde::Deserialize;

/// Status of a single task within a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Paused,
    Successful,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 6] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Paused,
        TaskStatus::Successful,
        TaskStatus::Failed,
        TaskStatus::Cancelled,
    ];

    /// Successful, Failed and Cancelled tasks never change again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Successful | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            TaskStatus::NotStarted => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Paused => 2,
            TaskStatus::Successful => 3,
            TaskStatus::Failed => 4,
            TaskStatus::Cancelled => 5,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => TaskStatus::InProgress,
            2 => TaskStatus::Paused,
            3 => TaskStatus::Successful,
            4 => TaskStatus::Failed,
            5 => TaskStatus::Cancelled,
            _ => TaskStatus::NotStarted,
        }
    }
}

/// Aggregate status of a whole mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionStatus {
    NotStarted,
    InProgress,
    Paused,
    Successful,
    Failed,
    Cancelled,
    PartiallySuccessful,
}

impl MissionStatus {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            MissionStatus::NotStarted => 0,
            MissionStatus::InProgress => 1,
            MissionStatus::Paused => 2,
            MissionStatus::Successful => 3,
            MissionStatus::Failed => 4,
            MissionStatus::Cancelled => 5,
            MissionStatus::PartiallySuccessful => 6,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => MissionStatus::InProgress,
            2 => MissionStatus::Paused,
            3 => MissionStatus::Successful,
            4 => MissionStatus::Failed,
            5 => MissionStatus::Cancelled,
            6 => MissionStatus::PartiallySuccessful,
            _ => MissionStatus::NotStarted,
        }
    }
}

/// Externally visible state of the robot, derived on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotStatus {
    Available,
    Busy,
    Paused,
    Home,
}

/// What a task asks the robot to do.
///
/// Only `ReturnToHome` influences the engine; the inspection kinds are
/// carried through for the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    ReturnToHome,
    #[default]
    TakeImage,
    TakeThermalImage,
    TakeVideo,
    TakeThermalVideo,
    RecordAudio,
    #[serde(rename = "take_co2_measurement")]
    TakeCo2Measurement,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::ReturnToHome => "return_to_home",
            TaskKind::TakeImage => "take_image",
            TaskKind::TakeThermalImage => "take_thermal_image",
            TaskKind::TakeVideo => "take_video",
            TaskKind::TakeThermalVideo => "take_thermal_video",
            TaskKind::RecordAudio => "record_audio",
            TaskKind::TakeCo2Measurement => "take_co2_measurement",
        };
        f.write_str(s)
    }
}

/// Mission status written when the worker exits because of a stop request.
///
/// - `Successful`: the mission is marked Successful regardless of why the
///   loop ended (default).
/// - `Cancelled`: the interrupted task and all tasks that never started are
///   marked Cancelled, and so is the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoppedMissionPolicy {
    #[default]
    Successful,
    Cancelled,
}
