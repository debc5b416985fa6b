// src/mission/loader.rs

//! Mission files for the command-line driver.
//!
//! ```toml
//! id = "survey-1"
//!
//! [[task]]
//! id = "t1"
//! kind = "take_image"
//!
//! [[task]]
//! id = "t2"
//! kind = "return_to_home"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{Result, RobotError};
use crate::mission::model::{Mission, Task};
use crate::types::TaskKind;

#[derive(Debug, Clone, Deserialize)]
pub struct MissionFile {
    pub id: String,

    #[serde(default)]
    pub task: Vec<TaskEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskEntry {
    pub id: String,

    /// Defaults to `take_image`.
    #[serde(default)]
    pub kind: TaskKind,
}

impl TryFrom<MissionFile> for Mission {
    type Error = RobotError;

    fn try_from(file: MissionFile) -> std::result::Result<Self, Self::Error> {
        validate_mission_file(&file)?;
        let tasks = file
            .task
            .into_iter()
            .map(|entry| Task::new(entry.id, entry.kind))
            .collect();
        Ok(Mission::new(file.id, tasks))
    }
}

fn validate_mission_file(file: &MissionFile) -> Result<()> {
    if file.id.trim().is_empty() {
        return Err(RobotError::ConfigError(
            "mission id must not be empty".to_string(),
        ));
    }
    if file.task.is_empty() {
        return Err(RobotError::ConfigError(format!(
            "mission '{}' must contain at least one [[task]] entry",
            file.id
        )));
    }

    let mut seen = HashSet::new();
    for entry in &file.task {
        if entry.id.trim().is_empty() {
            return Err(RobotError::ConfigError(format!(
                "mission '{}' has a task with an empty id",
                file.id
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(RobotError::ConfigError(format!(
                "mission '{}' has duplicate task id '{}'",
                file.id, entry.id
            )));
        }
    }
    Ok(())
}

/// Read and validate a mission file.
pub fn load_mission(path: impl AsRef<Path>) -> Result<Mission> {
    let contents = fs::read_to_string(path.as_ref())?;
    let file: MissionFile = toml::from_str(&contents)?;
    Mission::try_from(file)
}

/// Build a mission of `count` image tasks named `task-1`, `task-2`, ...
pub fn generated_mission(id: impl Into<String>, count: usize) -> Mission {
    let tasks = (1..=count)
        .map(|i| Task::new(format!("task-{i}"), TaskKind::TakeImage))
        .collect();
    Mission::new(id, tasks)
}
