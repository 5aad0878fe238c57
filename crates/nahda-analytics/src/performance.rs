use serde::{Deserialize, Serialize};

use nahda_core::entities::Task;

use crate::period::Period;
use crate::{finish_secs, ratio};

/// Completion figures for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub user_id: String,
    pub period: Period,
    pub tasks_completed: usize,
    /// Sum of approval finish times, in seconds.
    pub total_time_spent: f64,
    pub average_task_duration: f64,
    /// Share of completed tasks approved on or before their due date.
    pub on_time_completion_rate: f64,
    /// Completed tasks per week of `period`.
    pub velocity_score: f64,
}

impl PerformanceMetrics {
    /// Metrics over the tasks assigned to `user_id`.
    ///
    /// `period` only scales the velocity score; tasks are not filtered by it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate(user_id: &str, tasks: &[Task], period: Period) -> Self {
        let completed: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.assigned_to_id == user_id && t.is_completed)
            .collect();

        let total_time_spent: f64 = completed.iter().filter_map(|t| finish_secs(t)).sum();
        let average_task_duration = if completed.is_empty() {
            0.0
        } else {
            total_time_spent / completed.len() as f64
        };
        let on_time = completed.iter().filter(|t| t.completed_on_time()).count();

        let weeks = period.weeks();
        let velocity_score = if weeks > 0.0 {
            completed.len() as f64 / weeks
        } else {
            0.0
        };

        Self {
            user_id: user_id.to_string(),
            period,
            tasks_completed: completed.len(),
            total_time_spent,
            average_task_duration,
            on_time_completion_rate: ratio(on_time, completed.len()),
            velocity_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()
    }

    fn done(user: &str, finish: f64, late: bool) -> Task {
        let mut task: Task = serde_json::from_value(serde_json::json!({
            "id": format!("tsk-{user}-{finish}"),
            "team_id": "tem-1",
            "title": "Done",
            "assigned_to_id": user,
            "status": "completed",
            "is_completed": true,
        }))
        .unwrap();
        task.finish_time = Some(finish);
        task.completed_at = Some(now() - TimeDelta::days(1));
        task.due_date = Some(if late {
            now() - TimeDelta::days(2)
        } else {
            now()
        });
        task
    }

    #[test]
    fn metrics_for_one_user() {
        let mut open = done("usr-a", 0.0, false);
        open.is_completed = false;
        open.finish_time = None;
        let tasks = vec![
            done("usr-a", 3600.0, false),
            done("usr-a", 7200.0, true),
            done("usr-b", 999.0, false),
            open,
        ];
        let period = Period::trailing(now(), TimeDelta::weeks(2));
        let metrics = PerformanceMetrics::calculate("usr-a", &tasks, period);

        assert_eq!(metrics.tasks_completed, 2);
        assert_eq!(metrics.total_time_spent, 10800.0);
        assert_eq!(metrics.average_task_duration, 5400.0);
        assert_eq!(metrics.on_time_completion_rate, 0.5);
        assert!((metrics.velocity_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_period_has_zero_velocity() {
        let tasks = vec![done("usr-a", 60.0, false)];
        let metrics = PerformanceMetrics::calculate("usr-a", &tasks, Period::new(now(), now()));
        assert_eq!(metrics.velocity_score, 0.0);
        let inverted = Period::new(now(), now() - TimeDelta::days(1));
        assert_eq!(
            PerformanceMetrics::calculate("usr-a", &tasks, inverted).velocity_score,
            0.0
        );
    }

    #[test]
    fn unknown_user_gets_zeroes() {
        let metrics = PerformanceMetrics::calculate(
            "usr-z",
            &[done("usr-a", 60.0, false)],
            Period::trailing(now(), TimeDelta::weeks(1)),
        );
        assert_eq!(metrics.tasks_completed, 0);
        assert_eq!(metrics.average_task_duration, 0.0);
        assert_eq!(metrics.on_time_completion_rate, 0.0);
    }
}
