use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use nahda_core::entities::Task;

use crate::period::Period;
use crate::ratio;

/// Throughput of a team over the current sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamVelocity {
    pub team_id: String,
    /// Sprint number counted from the Unix epoch.
    pub sprint: i64,
    pub completed_points: usize,
    /// Every task with a completion mark inside the sprint.
    pub planned_points: usize,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub completion_rate: f64,
}

impl TeamVelocity {
    /// Velocity over the sprint ending at `now`.
    ///
    /// A task is planned if its `completed_at` falls inside the sprint and
    /// completed if it is also marked complete. Session ends stamp
    /// `completed_at`, so planned covers every task touched in the window.
    #[must_use]
    pub fn calculate_current(
        team_id: &str,
        tasks: &[Task],
        sprint_duration: TimeDelta,
        now: DateTime<Utc>,
    ) -> Self {
        let window = Period::trailing(now, sprint_duration);
        let in_window: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.completed_at.is_some_and(|at| window.contains(at)))
            .collect();
        let completed = in_window.iter().filter(|t| t.is_completed).count();

        Self {
            team_id: team_id.to_string(),
            sprint: sprint_number(now, sprint_duration),
            completed_points: completed,
            planned_points: in_window.len(),
            start_date: window.start,
            end_date: window.end,
            completion_rate: ratio(completed, in_window.len()),
        }
    }
}

fn sprint_number(now: DateTime<Utc>, sprint_duration: TimeDelta) -> i64 {
    let length = sprint_duration.num_milliseconds();
    if length <= 0 {
        return 0;
    }
    now.timestamp_millis().div_euclid(length)
}
