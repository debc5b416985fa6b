// src/mission/model.rs

//! Mission and task types shared between the collaborator and the engine.
//!
//! Status fields are atomics: the worker thread is the only writer, and the
//! control surface reads them without taking a lock. A reader may see a
//! status that changes again right after the load.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::types::{MissionStatus, TaskKind, TaskStatus};

/// A single unit of work within a mission.
#[derive(Debug)]
pub struct Task {
    id: String,
    kind: TaskKind,
    status: AtomicU8,
}

impl Task {
    pub fn new(id: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: id.into(),
            kind,
            status: AtomicU8::new(TaskStatus::NotStarted.as_u8()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub(crate) fn set_status(&self, status: TaskStatus) {
        self.status.store(status.as_u8(), Ordering::Release);
    }
}

/// An ordered set of tasks submitted for execution.
#[derive(Debug)]
pub struct Mission {
    id: String,
    tasks: Vec<Task>,
    status: AtomicU8,
}

impl Mission {
    pub fn new(id: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            tasks,
            status: AtomicU8::new(MissionStatus::NotStarted.as_u8()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Kind of the first task, if the mission has any.
    pub fn first_kind(&self) -> Option<TaskKind> {
        self.tasks.first().map(Task::kind)
    }

    /// Snapshot of every task's status, in task order.
    pub fn task_statuses(&self) -> Vec<TaskStatus> {
        self.tasks.iter().map(Task::status).collect()
    }

    /// Status field written by the engine when its loop ends.
    ///
    /// This is not the aggregate status; see `Robot::mission_status`.
    pub fn status(&self) -> MissionStatus {
        MissionStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub(crate) fn set_status(&self, status: MissionStatus) {
        self.status.store(status.as_u8(), Ordering::Release);
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} tasks)", self.id, self.tasks.len())
    }
}
