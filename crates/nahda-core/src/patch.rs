//! Task mutation patches.
//!
//! Every engine operation that changes a task returns a `TaskPatch` instead of
//! touching storage. Only `Some` fields are written; `activities` are appended
//! to the log. The serialized patch (changed fields only) is what the caller
//! sends to the document store.
//!
//! A patch is a compare-and-set: it records the status (and, for role-guarded
//! changes, the assignee) the task had when the patch was produced, and
//! [`TaskPatch::apply_to`] refuses to apply it once the live task has moved
//! on. Session changes are deltas checked against the live session list, so
//! two patches built from one snapshot never overwrite each other.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CompletionRequest, Task, TaskActivity, WorkSession};
use crate::enums::{TaskPriority, TaskStatus};
use crate::errors::CoreError;
use crate::timing::sanitize_secs;

/// Closing stamp for a session that must still be open at commit time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionClose {
    pub session_id: String,
    pub end_time: DateTime<Utc>,
    /// Seconds added to the live `time_spent`.
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskPatch {
    pub task_id: String,
    /// Status the task must still have when the patch is committed.
    pub expected_status: TaskStatus,
    /// Assignee the task must still have when the patch is committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_request: Option<CompletionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<Option<String>>,
    /// Written only if the live task has no start time yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<f64>,
    /// Appended unless its user already has an open session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_session: Option<WorkSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_session: Option<SessionClose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<TaskActivity>,
}

impl TaskPatch {
    /// Status after the patch is applied.
    #[must_use]
    pub fn resulting_status(&self) -> TaskStatus {
        self.status.unwrap_or(self.expected_status)
    }

    /// Apply the patch to `task` if every precondition still holds.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] if the patch targets a different task.
    /// - [`CoreError::StaleStatus`] if `task.status` no longer equals
    ///   `expected_status`.
    /// - [`CoreError::StalePrecondition`] if the assignee changed, the
    ///   session user already has an open session, or the session to close
    ///   is missing or already closed.
    ///
    /// On error the task is left untouched.
    pub fn apply_to(&self, task: &mut Task) -> Result<(), CoreError> {
        if task.id != self.task_id {
            return Err(CoreError::Validation(format!(
                "patch for task {} applied to task {}",
                self.task_id, task.id
            )));
        }
        if task.status != self.expected_status {
            return Err(CoreError::StaleStatus {
                task_id: task.id.clone(),
                expected: self.expected_status,
                actual: task.status,
            });
        }
        let stale = |reason: String| CoreError::StalePrecondition {
            task_id: task.id.clone(),
            reason,
        };
        if let Some(ref expected) = self.expected_assignee {
            if task.assigned_to_id != *expected {
                return Err(stale(format!(
                    "assignee changed from {expected} to {}",
                    task.assigned_to_id
                )));
            }
        }
        if let Some(ref session) = self.open_session {
            if let Some(open) = task.open_session_for(&session.user_id) {
                return Err(stale(format!(
                    "user {} already has open session {}",
                    session.user_id, open.id
                )));
            }
        }
        let close_index = match self.close_session {
            Some(ref close) => {
                match task.work_sessions.iter().position(|s| s.id == close.session_id) {
                    Some(index) if task.work_sessions[index].is_open() => Some(index),
                    Some(_) => {
                        return Err(stale(format!("session {} already closed", close.session_id)));
                    }
                    None => return Err(stale(format!("no session {}", close.session_id))),
                }
            }
            None => None,
        };

        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
        if let Some(ref assignee) = self.assigned_to_id {
            task.assigned_to_id.clone_from(assignee);
        }
        if let Some(ref image_url) = self.image_url {
            task.image_url = Some(image_url.clone());
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(ref depends_on) = self.depends_on {
            task.depends_on.clone_from(depends_on);
        }
        if let Some(ref request) = self.completion_request {
            task.completion_request = Some(request.clone());
        }
        if let Some(ref reason) = self.rejection_reason {
            task.rejection_reason.clone_from(reason);
        }
        if let Some(started_at) = self.started_at {
            task.started_at.get_or_insert(started_at);
        }
        if let Some(completed_at) = self.completed_at {
            task.completed_at = Some(completed_at);
        }
        if let Some(finish_time) = self.finish_time {
            task.finish_time = Some(finish_time);
        }
        if let Some(ref session) = self.open_session {
            task.work_sessions.push(session.clone());
        }
        if let (Some(close), Some(index)) = (&self.close_session, close_index) {
            let duration = sanitize_secs(close.duration);
            let session = &mut task.work_sessions[index];
            session.end_time = Some(close.end_time);
            session.duration = duration;
            task.time_spent = sanitize_secs(task.time_spent) + duration;
        }
        if let Some(at) = self.last_modified_at {
            task.last_modified_at = Some(at);
        }
        if let Some(ref by) = self.last_modified_by {
            task.last_modified_by = Some(by.clone());
        }
        task.activity_log.extend(self.activities.iter().cloned());
        Ok(())
    }
}

pub struct TaskPatchBuilder(TaskPatch);

impl TaskPatchBuilder {
    /// Start a patch for `task`, pinned to its current status.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self::new(task.id.clone(), task.status)
    }

    #[must_use]
    pub fn new(task_id: String, expected_status: TaskStatus) -> Self {
        Self(TaskPatch {
            task_id,
            expected_status,
            expected_assignee: None,
            status: None,
            is_completed: None,
            assigned_to_id: None,
            image_url: None,
            priority: None,
            due_date: None,
            depends_on: None,
            completion_request: None,
            rejection_reason: None,
            started_at: None,
            completed_at: None,
            finish_time: None,
            open_session: None,
            close_session: None,
            last_modified_at: None,
            last_modified_by: None,
            activities: Vec::new(),
        })
    }

    /// Pin the patch to the task's current assignee.
    #[must_use]
    pub fn expected_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.0.expected_assignee = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn is_completed(mut self, is_completed: bool) -> Self {
        self.0.is_completed = Some(is_completed);
        self
    }

    #[must_use]
    pub fn assigned_to_id(mut self, assignee: impl Into<String>) -> Self {
        self.0.assigned_to_id = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.0.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn depends_on(mut self, depends_on: Vec<String>) -> Self {
        self.0.depends_on = Some(depends_on);
        self
    }

    #[must_use]
    pub fn completion_request(mut self, request: CompletionRequest) -> Self {
        self.0.completion_request = Some(request);
        self
    }

    #[must_use]
    pub fn rejection_reason(mut self, reason: Option<String>) -> Self {
        self.0.rejection_reason = Some(reason);
        self
    }

    #[must_use]
    pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.0.started_at = Some(at);
        self
    }

    #[must_use]
    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.0.completed_at = Some(at);
        self
    }

    #[must_use]
    pub fn finish_time(mut self, secs: f64) -> Self {
        self.0.finish_time = Some(secs);
        self
    }

    #[must_use]
    pub fn open_session(mut self, session: WorkSession) -> Self {
        self.0.open_session = Some(session);
        self
    }

    #[must_use]
    pub fn close_session(mut self, close: SessionClose) -> Self {
        self.0.close_session = Some(close);
        self
    }

    #[must_use]
    pub fn modified_by(mut self, user_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.0.last_modified_by = Some(user_id.into());
        self.0.last_modified_at = Some(at);
        self
    }

    #[must_use]
    pub fn activity(mut self, activity: TaskActivity) -> Self {
        self.0.activities.push(activity);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskPatch {
        self.0
    }
}
