//! Error types for lifecycle operations.

use std::fmt;

use nahda_core::CoreError;
use nahda_core::enums::TaskStatus;
use thiserror::Error;

/// Role a guard requires of the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Assignee,
    TeamLeader,
    /// The assignee or the team leader.
    Participant,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assignee => "assignee",
            Self::TeamLeader => "team leader",
            Self::Participant => "assignee or team leader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from validating a status transition or field edit.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The actor lacks the role the operation requires.
    #[error("User {actor} cannot {action} task {task_id}: only the {required} may")]
    Unauthorized {
        task_id: String,
        actor: String,
        action: &'static str,
        required: Role,
    },

    /// The task is not in a source state for the operation, or a required
    /// field is missing.
    #[error("Cannot {action} task {task_id} in status {from}: {reason}")]
    InvalidTransition {
        task_id: String,
        action: &'static str,
        from: TaskStatus,
        reason: String,
    },

    /// A referenced task or dependency is absent from the snapshot.
    #[error("Not found: {what} {id}")]
    NotFound { what: &'static str, id: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl TransitionError {
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

/// Why a work session operation conflicts with the task's sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionConflict {
    /// The user already has an open session on this task.
    AlreadyOpen { user_id: String, session_id: String },
    /// No session with this ID exists on the task.
    UnknownSession { session_id: String },
    /// The session was already closed.
    AlreadyClosed { session_id: String },
}

impl fmt::Display for SessionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyOpen {
                user_id,
                session_id,
            } => write!(f, "user {user_id} already has open session {session_id}"),
            Self::UnknownSession { session_id } => write!(f, "no session {session_id}"),
            Self::AlreadyClosed { session_id } => {
                write!(f, "session {session_id} is already closed")
            }
        }
    }
}

/// Errors from starting or ending a work session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session conflict on task {task_id}: {conflict}")]
    SessionConflict {
        task_id: String,
        conflict: SessionConflict,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
