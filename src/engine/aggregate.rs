// src/engine/aggregate.rs

//! Mission status aggregation.
//!
//! The mission-level status is derived from the task statuses plus two
//! signals (resume gate set, worker alive) by walking [`RULES`] in order;
//! the first matching rule decides. Rules 6 to 8 overlap on purpose and must
//! stay in this order: moving "any Cancelled" after "any Failed" changes the
//! answer for mixed Failed/Cancelled missions.

use crate::types::{MissionStatus, TaskStatus};

/// Inputs to one aggregation.
#[derive(Debug, Clone, Copy)]
pub struct StatusInputs<'a> {
    pub tasks: &'a [TaskStatus],
    pub resume_set: bool,
    pub worker_alive: bool,
}

impl StatusInputs<'_> {
    fn all(&self, status: TaskStatus) -> bool {
        self.tasks.iter().all(|s| *s == status)
    }

    fn any(&self, statuses: &[TaskStatus]) -> bool {
        self.tasks.iter().any(|s| statuses.contains(s))
    }
}

/// Result of running the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVerdict {
    Resolved(MissionStatus),
    /// No rule matched, e.g. only Successful and Paused tasks after the
    /// worker has exited.
    Indeterminate,
}

impl StatusVerdict {
    pub fn status(self) -> Option<MissionStatus> {
        match self {
            StatusVerdict::Resolved(status) => Some(status),
            StatusVerdict::Indeterminate => None,
        }
    }
}

/// One row of the precedence table.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&StatusInputs<'_>) -> bool,
    pub status: MissionStatus,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "paused",
        matches: resume_cleared,
        status: MissionStatus::Paused,
    },
    Rule {
        name: "all-not-started",
        matches: all_not_started,
        status: MissionStatus::NotStarted,
    },
    Rule {
        name: "worker-alive",
        matches: worker_alive,
        status: MissionStatus::InProgress,
    },
    Rule {
        name: "all-successful",
        matches: all_successful,
        status: MissionStatus::Successful,
    },
    Rule {
        name: "any-unfinished",
        matches: any_unfinished,
        status: MissionStatus::InProgress,
    },
    Rule {
        name: "all-failed",
        matches: all_failed,
        status: MissionStatus::Failed,
    },
    Rule {
        name: "any-cancelled",
        matches: any_cancelled,
        status: MissionStatus::Cancelled,
    },
    Rule {
        name: "any-failed",
        matches: any_failed,
        status: MissionStatus::PartiallySuccessful,
    },
];

fn resume_cleared(i: &StatusInputs<'_>) -> bool {
    !i.resume_set
}

fn all_not_started(i: &StatusInputs<'_>) -> bool {
    i.all(TaskStatus::NotStarted)
}

fn worker_alive(i: &StatusInputs<'_>) -> bool {
    i.worker_alive
}

fn all_successful(i: &StatusInputs<'_>) -> bool {
    i.all(TaskStatus::Successful)
}

fn any_unfinished(i: &StatusInputs<'_>) -> bool {
    i.any(&[TaskStatus::InProgress, TaskStatus::NotStarted])
}

fn all_failed(i: &StatusInputs<'_>) -> bool {
    i.all(TaskStatus::Failed)
}

fn any_cancelled(i: &StatusInputs<'_>) -> bool {
    i.any(&[TaskStatus::Cancelled])
}

fn any_failed(i: &StatusInputs<'_>) -> bool {
    i.any(&[TaskStatus::Failed])
}

fn deciding(inputs: &StatusInputs<'_>) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(inputs))
}

/// Derive the mission status. Pure and total.
pub fn aggregate_status(
    tasks: &[TaskStatus],
    resume_set: bool,
    worker_alive: bool,
) -> StatusVerdict {
    let inputs = StatusInputs {
        tasks,
        resume_set,
        worker_alive,
    };

    match deciding(&inputs) {
        Some(rule) => StatusVerdict::Resolved(rule.status),
        None => StatusVerdict::Indeterminate,
    }
}

/// Name of the rule that decides for these inputs, for diagnostics.
pub fn deciding_rule(
    tasks: &[TaskStatus],
    resume_set: bool,
    worker_alive: bool,
) -> Option<&'static str> {
    let inputs = StatusInputs {
        tasks,
        resume_set,
        worker_alive,
    };
    deciding(&inputs).map(|rule| rule.name)
}
