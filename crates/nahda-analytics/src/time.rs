//! Completion-time statistics and prediction.

use std::collections::BTreeMap;

use tracing::debug;

use nahda_config::AnalyticsConfig;
use nahda_core::entities::Task;
use nahda_core::enums::{CompletionTrend, TaskPriority};

use crate::{finish_secs, mean};

/// Completion-time analysis over a set of historical tasks.
#[derive(Debug, Clone)]
pub struct TimeAnalytics<'a> {
    tasks: &'a [Task],
    config: AnalyticsConfig,
}

impl<'a> TimeAnalytics<'a> {
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        Self::with_config(tasks, &AnalyticsConfig::default())
    }

    #[must_use]
    pub fn with_config(tasks: &'a [Task], config: &AnalyticsConfig) -> Self {
        Self {
            tasks,
            config: config.clone(),
        }
    }

    /// Completed tasks that carry a finish time, paired with it.
    fn finished(&self) -> impl Iterator<Item = (&'a Task, f64)> + '_ {
        self.tasks
            .iter()
            .filter_map(|t| finish_secs(t).map(|secs| (t, secs)))
    }

    /// Mean finish time over completed tasks, 0 when there are none.
    #[must_use]
    pub fn average_completion_time(&self) -> f64 {
        let times: Vec<f64> = self.finished().map(|(_, secs)| secs).collect();
        mean(&times)
    }

    /// Mean finish time per priority. Priorities without completed tasks are
    /// absent.
    #[must_use]
    pub fn completion_times_by_priority(&self) -> BTreeMap<TaskPriority, f64> {
        let mut grouped: BTreeMap<TaskPriority, Vec<f64>> = BTreeMap::new();
        for (task, secs) in self.finished() {
            grouped.entry(task.priority).or_default().push(secs);
        }
        grouped
            .into_iter()
            .map(|(priority, times)| (priority, mean(&times)))
            .collect()
    }

    /// How alike two tasks are, for weighting historical finish times.
    #[allow(clippy::cast_precision_loss)]
    fn similarity(&self, a: &Task, b: &Task) -> f64 {
        let mut weight = 1.0;
        if a.priority == b.priority {
            weight *= self.config.priority_match_weight;
        }
        let length_diff = a.description_len().abs_diff(b.description_len()) as f64;
        weight / (1.0 + length_diff / self.config.description_length_scale)
    }

    /// Predicted seconds to complete `task`.
    ///
    /// Weighted mean of the finish times of completed tasks with the same
    /// priority, weighted by description-length similarity. Falls back to
    /// [`Self::average_completion_time`] when there is no such task.
    #[must_use]
    pub fn estimate_completion_time(&self, task: &Task) -> f64 {
        let mut total_weight = 0.0;
        let mut weighted_time = 0.0;
        let mut candidates = 0usize;
        for (other, secs) in self.finished() {
            if other.priority != task.priority || other.id == task.id {
                continue;
            }
            let weight = self.similarity(task, other);
            weighted_time += secs * weight;
            total_weight += weight;
            candidates += 1;
        }

        if total_weight > 0.0 {
            weighted_time / total_weight
        } else {
            debug!(
                task_id = %task.id,
                priority = %task.priority,
                candidates,
                "no comparable completions; using overall average"
            );
            self.average_completion_time()
        }
    }

    /// Least-squares slope of the most recent finish times against their
    /// index, oldest first. `None` with fewer than two completions.
    #[must_use]
    pub fn trend_slope(&self) -> Option<f64> {
        let mut finished: Vec<(&Task, f64)> = self.finished().collect();
        // Completions without a timestamp sort as most recent.
        finished.sort_by_key(|(t, _)| (t.completed_at.is_none(), t.completed_at));
        let start = finished.len().saturating_sub(self.config.trend_window);
        let recent: Vec<f64> = finished[start..].iter().map(|(_, secs)| *secs).collect();
        least_squares_slope(&recent)
    }

    /// Whether recent completions are getting faster, slower, or neither.
    #[must_use]
    pub fn completion_trend(&self) -> CompletionTrend {
        let Some(slope) = self.trend_slope() else {
            return CompletionTrend::Stable;
        };
        if slope < -self.config.trend_threshold {
            CompletionTrend::Improving
        } else if slope > self.config.trend_threshold {
            CompletionTrend::Slowing
        } else {
            CompletionTrend::Stable
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn least_squares_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    Some(n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn at(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap() + TimeDelta::days(day)
    }

    fn completed(id: &str, priority: TaskPriority, description: &str, finish: f64, day: i64) -> Task {
        let mut task: Task = serde_json::from_value(serde_json::json!({
            "id": id,
            "team_id": "tem-1",
            "title": id,
            "assigned_to_id": "usr-1",
            "status": "completed",
            "is_completed": true,
        }))
        .unwrap();
        task.priority = priority;
        task.description = description.to_string();
        task.finish_time = Some(finish);
        task.completed_at = Some(at(day));
        task
    }

    fn fresh(priority: TaskPriority, description: &str) -> Task {
        let mut task: Task = serde_json::from_value(serde_json::json!({
            "id": "tsk-new",
            "team_id": "tem-1",
            "title": "new",
            "assigned_to_id": "usr-1",
        }))
        .unwrap();
        task.priority = priority;
        task.description = description.to_string();
        task
    }

    #[test]
    fn single_matching_candidate_is_returned_exactly() {
        let history = vec![completed("a", TaskPriority::High, "same length", 4321.0, 0)];
        let analytics = TimeAnalytics::new(&history);
        let estimate = analytics.estimate_completion_time(&fresh(TaskPriority::High, "other words"));
        assert_eq!(estimate, 4321.0);
    }

    #[test]
    fn closer_descriptions_weigh_more() {
        let history = vec![
            completed("short", TaskPriority::Medium, "", 1000.0, 0),
            completed("long", TaskPriority::Medium, &"x".repeat(200), 4000.0, 1),
        ];
        let analytics = TimeAnalytics::new(&history);
        let estimate = analytics.estimate_completion_time(&fresh(TaskPriority::Medium, ""));
        // weights 1.5 and 1.5 / 3
        let expected = (1000.0 * 1.5 + 4000.0 * 0.5) / 2.0;
        assert!((estimate - expected).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_overall_average() {
        let history = vec![
            completed("a", TaskPriority::Low, "", 100.0, 0),
            completed("b", TaskPriority::Medium, "", 300.0, 1),
        ];
        let analytics = TimeAnalytics::new(&history);
        assert_eq!(
            analytics.estimate_completion_time(&fresh(TaskPriority::High, "")),
            200.0
        );
        assert_eq!(TimeAnalytics::new(&[]).estimate_completion_time(&fresh(TaskPriority::High, "")), 0.0);
    }

    #[test]
    fn task_does_not_predict_itself() {
        let history = vec![
            completed("tsk-new", TaskPriority::High, "", 50.0, 0),
            completed("b", TaskPriority::High, "", 150.0, 1),
        ];
        let analytics = TimeAnalytics::new(&history);
        assert_eq!(
            analytics.estimate_completion_time(&fresh(TaskPriority::High, "")),
            150.0
        );
    }

    #[test]
    fn averages_by_priority() {
        let mut unfinished = completed("x", TaskPriority::Low, "", 9999.0, 0);
        unfinished.is_completed = false;
        let history = vec![
            completed("a", TaskPriority::Low, "", 100.0, 0),
            completed("b", TaskPriority::Low, "", 200.0, 1),
            completed("c", TaskPriority::High, "", 600.0, 2),
            unfinished,
        ];
        let by_priority = TimeAnalytics::new(&history).completion_times_by_priority();
        assert_eq!(
            by_priority,
            BTreeMap::from([(TaskPriority::Low, 150.0), (TaskPriority::High, 600.0)])
        );
        assert_eq!(TimeAnalytics::new(&history).average_completion_time(), 300.0);
    }

    #[rstest]
    #[case::shrinking(&[500.0, 400.0, 300.0, 200.0, 100.0], CompletionTrend::Improving)]
    #[case::growing(&[100.0, 200.0, 300.0], CompletionTrend::Slowing)]
    #[case::flat(&[250.0, 250.0, 250.0, 250.0], CompletionTrend::Stable)]
    #[case::nearly_flat(&[100.0, 100.05, 100.1], CompletionTrend::Stable)]
    #[case::single(&[100.0], CompletionTrend::Stable)]
    #[case::none(&[], CompletionTrend::Stable)]
    fn trend_classification(#[case] finishes: &[f64], #[case] expected: CompletionTrend) {
        let history: Vec<Task> = finishes
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let day = i64::try_from(i).unwrap();
                completed(&format!("t{i}"), TaskPriority::Medium, "", f, day)
            })
            .collect();
        assert_eq!(TimeAnalytics::new(&history).completion_trend(), expected);
    }

    #[test]
    fn trend_uses_completion_order_and_window() {
        // Listed newest first; only the last five completions count.
        let history = vec![
            completed("e", TaskPriority::Low, "", 100.0, 6),
            completed("d", TaskPriority::Low, "", 200.0, 5),
            completed("c", TaskPriority::Low, "", 300.0, 4),
            completed("b", TaskPriority::Low, "", 400.0, 3),
            completed("a", TaskPriority::Low, "", 500.0, 2),
            completed("old", TaskPriority::Low, "", 1.0, 0),
        ];
        let analytics = TimeAnalytics::new(&history);
        assert_eq!(analytics.trend_slope(), Some(-100.0));
        assert_eq!(analytics.completion_trend(), CompletionTrend::Improving);
    }

    #[test]
    fn window_and_threshold_come_from_config() {
        let history = vec![
            completed("a", TaskPriority::Low, "", 100.0, 0),
            completed("b", TaskPriority::Low, "", 110.0, 1),
            completed("c", TaskPriority::Low, "", 120.0, 2),
        ];
        let config = AnalyticsConfig {
            trend_threshold: 50.0,
            ..AnalyticsConfig::default()
        };
        assert_eq!(
            TimeAnalytics::with_config(&history, &config).completion_trend(),
            CompletionTrend::Stable
        );
        assert_eq!(
            TimeAnalytics::new(&history).completion_trend(),
            CompletionTrend::Slowing
        );
    }
}
