// tests/property_aggregate.rs

use proptest::prelude::*;

use eelink_sim::engine::{aggregate_status, StatusVerdict};
use eelink_sim::types::{MissionStatus, TaskStatus};

fn task_status() -> impl Strategy<Value = TaskStatus> {
    proptest::sample::select(TaskStatus::ALL.to_vec())
}

fn task_statuses() -> impl Strategy<Value = Vec<TaskStatus>> {
    proptest::collection::vec(task_status(), 0..8)
}

proptest! {
    #[test]
    fn aggregation_is_deterministic(
        tasks in task_statuses(),
        resume_set in any::<bool>(),
        worker_alive in any::<bool>(),
    ) {
        let first = aggregate_status(&tasks, resume_set, worker_alive);
        let second = aggregate_status(&tasks, resume_set, worker_alive);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cleared_resume_signal_always_means_paused(
        tasks in task_statuses(),
        worker_alive in any::<bool>(),
    ) {
        prop_assert_eq!(
            aggregate_status(&tasks, false, worker_alive),
            StatusVerdict::Resolved(MissionStatus::Paused)
        );
    }

    #[test]
    fn live_worker_is_not_started_or_in_progress(tasks in task_statuses()) {
        let verdict = aggregate_status(&tasks, true, true);
        prop_assert!(matches!(
            verdict,
            StatusVerdict::Resolved(MissionStatus::NotStarted)
                | StatusVerdict::Resolved(MissionStatus::InProgress)
        ));
    }

    #[test]
    fn indeterminate_only_for_successful_and_paused_leftovers(
        tasks in task_statuses(),
        resume_set in any::<bool>(),
        worker_alive in any::<bool>(),
    ) {
        let verdict = aggregate_status(&tasks, resume_set, worker_alive);
        let leftovers = resume_set
            && !worker_alive
            && tasks.iter().all(|s| matches!(s, TaskStatus::Successful | TaskStatus::Paused))
            && tasks.contains(&TaskStatus::Paused);
        prop_assert_eq!(verdict == StatusVerdict::Indeterminate, leftovers);
    }
}
