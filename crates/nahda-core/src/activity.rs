//! Typed activity payloads.
//!
//! Each entry in a task's activity log carries one `ActivityKind`. The payload
//! holds the changed values themselves; rendering them as prose is left to the
//! presentation layer.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskPriority;

/// What happened to a task, with the values involved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActivityKind {
    Created {
        title: String,
    },
    Submitted {
        image_url: String,
    },
    Approved {
        /// Wall-clock seconds from `started_at` to approval.
        finish_time: f64,
    },
    Rejected {
        reason: String,
    },
    Resumed,
    Reassigned {
        from: String,
        to: String,
    },
    SessionStarted {
        session_id: String,
    },
    SessionEnded {
        session_id: String,
        duration: f64,
    },
    DependencyAdded {
        depends_on: String,
    },
    DependencyRemoved {
        depends_on: String,
    },
    PriorityChanged {
        from: TaskPriority,
        to: TaskPriority,
    },
    DueDateChanged {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}

impl ActivityKind {
    /// Stable tag matching the serialized `action` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Submitted { .. } => "submitted",
            Self::Approved { .. } => "approved",
            Self::Rejected { .. } => "rejected",
            Self::Resumed => "resumed",
            Self::Reassigned { .. } => "reassigned",
            Self::SessionStarted { .. } => "session_started",
            Self::SessionEnded { .. } => "session_ended",
            Self::DependencyAdded { .. } => "dependency_added",
            Self::DependencyRemoved { .. } => "dependency_removed",
            Self::PriorityChanged { .. } => "priority_changed",
            Self::DueDateChanged { .. } => "due_date_changed",
        }
    }

    /// Whether this activity moved the task between statuses.
    #[must_use]
    pub const fn is_status_change(&self) -> bool {
        matches!(
            self,
            Self::Submitted { .. } | Self::Approved { .. } | Self::Rejected { .. } | Self::Resumed
        )
    }
}
