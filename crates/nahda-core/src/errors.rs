//! Cross-cutting error types for Nahda.
//!
//! Domain-specific errors (`TransitionError`, `ScheduleError`, ...) live in
//! their respective crates. Errors raised while building or committing a
//! [`TaskPatch`](crate::patch::TaskPatch) are defined here.

use thiserror::Error;

use crate::enums::TaskStatus;

/// Errors that can be raised by any Nahda crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// The task changed status between validation and commit.
    #[error("Stale patch for task {task_id}: expected status {expected}, found {actual}")]
    StaleStatus {
        task_id: String,
        expected: TaskStatus,
        actual: TaskStatus,
    },

    /// A non-status precondition of the patch no longer holds.
    #[error("Stale patch for task {task_id}: {reason}")]
    StalePrecondition { task_id: String, reason: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The OS random source could not produce an ID.
    #[error("ID generation failed: {0}")]
    IdGeneration(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
