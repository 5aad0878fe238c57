//! Team-wide breakdowns by priority, member, and status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use nahda_core::entities::{Task, Team};
use nahda_core::enums::{TaskPriority, TaskStatus};

use crate::time::TimeAnalytics;
use crate::{mean, ratio};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityStatistics {
    /// Sum of `Task::total_time_spent` over completed tasks.
    pub total_time: f64,
    pub average_time: f64,
    pub task_count: usize,
    pub completed_count: usize,
    pub active_count: usize,
    pub completion_rate: f64,
}

impl PriorityStatistics {
    #[must_use]
    pub fn for_priority(tasks: &[Task], priority: TaskPriority) -> Self {
        let of_priority: Vec<&Task> = tasks.iter().filter(|t| t.priority == priority).collect();
        let times: Vec<f64> = of_priority
            .iter()
            .filter(|t| t.is_completed)
            .map(|t| nahda_core::timing::sanitize_secs(t.total_time_spent()))
            .collect();

        Self {
            total_time: times.iter().sum(),
            average_time: mean(&times),
            task_count: of_priority.len(),
            completed_count: times.len(),
            active_count: of_priority.iter().filter(|t| t.is_active()).count(),
            completion_rate: ratio(times.len(), of_priority.len()),
        }
    }

    /// Statistics for every priority, including empty ones.
    #[must_use]
    pub fn by_priority(tasks: &[Task]) -> BTreeMap<TaskPriority, Self> {
        TaskPriority::ALL
            .into_iter()
            .map(|p| (p, Self::for_priority(tasks, p)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalytics {
    pub team_id: String,
    pub completion_rate: f64,
    /// Mean approval finish time, in seconds.
    pub average_task_duration: f64,
    /// Completion rate per member, keyed by user ID.
    pub member_performance: BTreeMap<String, f64>,
    pub task_distribution: BTreeMap<TaskStatus, usize>,
}

impl TeamAnalytics {
    /// Analytics over the tasks belonging to `team`.
    ///
    /// Members listed on the team without tasks appear with a rate of 0;
    /// assignees missing from the member list are included as well.
    #[must_use]
    pub fn calculate(team: &Team, tasks: &[Task]) -> Self {
        let team_tasks: Vec<Task> = tasks
            .iter()
            .filter(|t| t.team_id == team.id)
            .cloned()
            .collect();
        let completed = team_tasks.iter().filter(|t| t.is_completed).count();

        let mut per_member: BTreeMap<String, (usize, usize)> = team
            .member_ids
            .iter()
            .map(|m| (m.clone(), (0, 0)))
            .collect();
        for task in &team_tasks {
            let entry = per_member.entry(task.assigned_to_id.clone()).or_default();
            entry.1 += 1;
            if task.is_completed {
                entry.0 += 1;
            }
        }

        let mut task_distribution: BTreeMap<TaskStatus, usize> =
            TaskStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for task in &team_tasks {
            *task_distribution.entry(task.status).or_default() += 1;
        }

        Self {
            team_id: team.id.clone(),
            completion_rate: ratio(completed, team_tasks.len()),
            average_task_duration: TimeAnalytics::new(&team_tasks).average_completion_time(),
            member_performance: per_member
                .into_iter()
                .map(|(member, (done, total))| (member, ratio(done, total)))
                .collect(),
            task_distribution,
        }
    }
}
