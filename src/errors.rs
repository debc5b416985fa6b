// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every control-surface operation returns one of these synchronously; no
//! variant is retried inside the crate.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RobotError {
    #[error("API call failed due to internal error")]
    CommunicationFailure,

    #[error("API call timed out after {0:?}")]
    CommunicationTimeout(Duration),

    #[error("Can not start mission by returning home, robot is already home")]
    AlreadyHome,

    #[error("Can not start mission, mission {0} is infeasible")]
    InfeasibleMission(String),

    #[error("Can not start new mission, mission {0} is already running")]
    AlreadyRunning(String),

    #[error("No mission running")]
    NoMissionRunning,

    #[error("Could not pause mission - mission already paused")]
    AlreadyPaused,

    #[error("Could not resume mission - no currently paused mission")]
    NotPaused,

    #[error("Task ID did not match any ongoing tasks: {0}")]
    TaskNotFound(String),

    #[error("Mission not found: {0}")]
    MissionNotFound(String),

    #[error("Could not determine status of mission {0} from its task statuses")]
    MissionStatusIndeterminate(String),

    #[error("Mission {0} has no tasks")]
    EmptyMission(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RobotError {
    /// Whether the error came from the simulated API link rather than from a
    /// rejected precondition. Transient errors may succeed when retried by the
    /// caller.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RobotError::CommunicationFailure | RobotError::CommunicationTimeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RobotError>;
