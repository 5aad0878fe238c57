use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CompletionRequest, TaskActivity, TaskDependency, WorkSession};
use crate::enums::{TaskPriority, TaskStatus};

/// A unit of team work assigned to one member.
///
/// Durations (`time_spent`, `finish_time`) are seconds. `time_spent` is active
/// work accumulated from closed work sessions; `finish_time` is wall-clock time
/// from `started_at` to approval, recorded once on approval.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Task {
    pub id: String,
    pub team_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to_id: String,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub activity_log: Vec<TaskActivity>,
    #[serde(default)]
    pub completion_request: Option<CompletionRequest>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default)]
    pub work_sessions: Vec<WorkSession>,
    #[serde(default)]
    pub finish_time: Option<f64>,
    #[serde(default)]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
}

impl Task {
    /// Recorded finish time if approved, accumulated work time otherwise.
    #[must_use]
    pub fn total_time_spent(&self) -> f64 {
        self.finish_time.unwrap_or(self.time_spent)
    }

    /// Started but not yet carrying a completion mark.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.started_at.is_some() && self.completed_at.is_none()
    }

    /// Finish-to-start edges derived from `depends_on`.
    #[must_use]
    pub fn dependencies(&self) -> Vec<TaskDependency> {
        self.depends_on
            .iter()
            .map(|dep| TaskDependency::finish_to_start(&self.id, dep))
            .collect()
    }

    /// The open work session belonging to `user_id`, if any.
    #[must_use]
    pub fn open_session_for(&self, user_id: &str) -> Option<&WorkSession> {
        self.work_sessions
            .iter()
            .find(|s| s.is_open() && s.user_id == user_id)
    }

    /// Description length in characters, used by similarity weighting.
    #[must_use]
    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }

    /// Whether the task was approved on or before its due date.
    #[must_use]
    pub fn completed_on_time(&self) -> bool {
        match (self.completed_at, self.due_date) {
            (Some(completed), Some(due)) => completed <= due,
            _ => false,
        }
    }
}

/// Caller-supplied fields for a new task; everything else is engine-managed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskDraft {
    pub team_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to_id: String,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}
