//! Remaining-work series for burndown charts.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use nahda_core::entities::Task;
use nahda_core::timing::{SECONDS_PER_DAY, seconds_between};

use crate::ratio;

/// Trailing window used for the velocity figure of each point.
const VELOCITY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownPoint {
    pub date: DateTime<Utc>,
    /// Tasks still open at `date`.
    pub remaining: f64,
    /// Tasks completed per day over the trailing week.
    pub velocity: f64,
    /// Share of tasks completed by `date` that met their due date; 1 when
    /// none are completed yet.
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Burndown {
    /// One point per day from start to end, burning down linearly.
    pub ideal: Vec<BurndownPoint>,
    /// The starting total, then one point per completion.
    pub actual: Vec<BurndownPoint>,
}

/// Completion timestamps of finished tasks, ascending.
fn completions(tasks: &[Task]) -> Vec<(DateTime<Utc>, &Task)> {
    let mut done: Vec<(DateTime<Utc>, &Task)> = tasks
        .iter()
        .filter(|t| t.is_completed)
        .filter_map(|t| t.completed_at.map(|at| (at, t)))
        .collect();
    done.sort_by_key(|(at, _)| *at);
    done
}

#[allow(clippy::cast_precision_loss)]
fn point_at(done: &[(DateTime<Utc>, &Task)], date: DateTime<Utc>, remaining: f64) -> BurndownPoint {
    let window_start = date - TimeDelta::days(VELOCITY_WINDOW_DAYS);
    let so_far: Vec<&Task> = done
        .iter()
        .filter(|(at, _)| *at <= date)
        .map(|(_, t)| *t)
        .collect();
    let in_window = done
        .iter()
        .filter(|(at, _)| *at > window_start && *at <= date)
        .count();
    let on_time = so_far.iter().filter(|t| t.completed_on_time()).count();

    BurndownPoint {
        date,
        remaining,
        velocity: in_window as f64 / VELOCITY_WINDOW_DAYS as f64,
        efficiency: if so_far.is_empty() {
            1.0
        } else {
            ratio(on_time, so_far.len())
        },
    }
}

/// Burndown of `tasks` between `start` and `end`.
///
/// An inverted range yields an empty ideal line.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn burndown(tasks: &[Task], start: DateTime<Utc>, end: DateTime<Utc>) -> Burndown {
    let total = tasks.len() as f64;
    let done = completions(tasks);

    let days = seconds_between(start, end) / SECONDS_PER_DAY;
    let daily_burn = if days > 0.0 { total / days } else { total };

    let mut ideal = Vec::new();
    let mut date = start;
    let mut remaining = total;
    while date <= end {
        ideal.push(point_at(&done, date, remaining.max(0.0)));
        remaining -= daily_burn;
        match date.checked_add_signed(TimeDelta::days(1)) {
            Some(next) => date = next,
            None => break,
        }
    }

    let mut actual = vec![BurndownPoint {
        date: start,
        remaining: total,
        velocity: 0.0,
        efficiency: 1.0,
    }];
    let mut remaining = total;
    for &(at, _) in &done {
        remaining -= 1.0;
        actual.push(point_at(&done, at, remaining));
    }

    Burndown { ideal, actual }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
    }

    fn task(id: &str, completed_day: Option<i64>, due_day: Option<i64>) -> Task {
        let mut task: Task = serde_json::from_value(serde_json::json!({
            "id": id,
            "team_id": "tem-1",
            "title": id,
            "assigned_to_id": "usr-1",
        }))
        .unwrap();
        task.is_completed = completed_day.is_some();
        task.completed_at = completed_day.map(day);
        task.due_date = due_day.map(day);
        task
    }

    #[test]
    fn ideal_line_burns_evenly() {
        let tasks = vec![task("a", None, None), task("b", None, None)];
        let chart = burndown(&tasks, day(0), day(4));
        let remaining: Vec<f64> = chart.ideal.iter().map(|p| p.remaining).collect();
        assert_eq!(remaining, vec![2.0, 1.5, 1.0, 0.5, 0.0]);
        assert_eq!(chart.actual.len(), 1);
    }

    #[test]
    fn actual_line_steps_per_completion() {
        let tasks = vec![
            task("a", Some(2), Some(3)),
            task("b", Some(1), Some(0)),
            task("c", None, None),
        ];
        let chart = burndown(&tasks, day(0), day(3));
        let actual: Vec<(DateTime<Utc>, f64)> =
            chart.actual.iter().map(|p| (p.date, p.remaining)).collect();
        assert_eq!(actual, vec![(day(0), 3.0), (day(1), 2.0), (day(2), 1.0)]);

        let last = chart.actual.last().unwrap();
        assert_eq!(last.efficiency, 0.5);
        assert!((last.velocity - 2.0 / 7.0).abs() < 1e-12);
        assert_eq!(chart.ideal[0].efficiency, 1.0);
    }

    #[test]
    fn session_marks_on_open_tasks_do_not_burn_down() {
        let mut touched = task("a", None, None);
        touched.completed_at = Some(day(1));
        let chart = burndown(&[touched], day(0), day(2));
        assert_eq!(chart.actual.len(), 1);
    }

    #[test]
    fn inverted_range_has_no_ideal_points() {
        let chart = burndown(&[task("a", None, None)], day(3), day(0));
        assert!(chart.ideal.is_empty());
        assert_eq!(chart.actual[0].remaining, 1.0);
    }
}
