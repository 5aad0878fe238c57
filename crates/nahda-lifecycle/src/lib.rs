//! # nahda-lifecycle
//!
//! Everything that mutates a task: the approval state machine, field edits,
//! and work session tracking. Each operation validates against a task
//! snapshot and returns a [`TaskPatch`](nahda_core::patch::TaskPatch); nothing
//! here writes to storage. [`store::TaskStore`] commits patches as
//! compare-and-set updates.

pub mod edit;
pub mod error;
pub mod session;
pub mod store;
pub mod transition;

pub use error::{Role, SessionConflict, SessionError, TransitionError};
pub use session::{SessionAction, apply_work_session};
pub use transition::{Transition, TransitionContext, create_task, validate_transition};
