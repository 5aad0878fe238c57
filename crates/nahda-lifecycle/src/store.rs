//! Compare-and-set commits of task patches.
//!
//! [`TaskStore`] is the seam to whatever document store holds tasks.
//! [`MemoryTaskStore`] is the in-process implementation used by the CLI and
//! tests.

use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::info;

use nahda_core::entities::Task;
use nahda_core::errors::CoreError;
use nahda_core::patch::TaskPatch;

use crate::error::{SessionError, TransitionError};
use crate::session::{SessionAction, apply_work_session};
use crate::transition::{Transition, TransitionContext, validate_transition};

/// Storage for tasks that commits patches atomically.
pub trait TaskStore {
    /// # Errors
    ///
    /// [`CoreError::NotFound`] if no task has this ID.
    fn get(&self, task_id: &str) -> Result<Task, CoreError>;

    /// # Errors
    ///
    /// [`CoreError::Validation`] if a task with the same ID exists.
    fn insert(&self, task: Task) -> Result<(), CoreError>;

    /// Apply `patch` if the stored task still meets its preconditions,
    /// returning the updated task.
    ///
    /// # Errors
    ///
    /// [`CoreError::StaleStatus`] if the status moved on, or
    /// [`CoreError::StalePrecondition`] if the assignee or sessions did; the
    /// stored task is left untouched. [`CoreError::NotFound`] if the task is
    /// gone.
    fn commit(&self, patch: &TaskPatch) -> Result<Task, CoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    #[must_use]
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    /// Current contents, in insertion order.
    ///
    /// # Errors
    ///
    /// [`CoreError::Other`] if the lock is poisoned.
    pub fn tasks(&self) -> Result<Vec<Task>, CoreError> {
        Ok(self.lock()?.clone())
    }

    /// # Errors
    ///
    /// [`CoreError::Other`] if the lock is poisoned.
    pub fn into_tasks(self) -> Result<Vec<Task>, CoreError> {
        self.tasks
            .into_inner()
            .map_err(|_| CoreError::Other(anyhow!("task store lock poisoned")))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Task>>, CoreError> {
        self.tasks
            .lock()
            .map_err(|_| CoreError::Other(anyhow!("task store lock poisoned")))
    }
}

fn not_found(task_id: &str) -> CoreError {
    CoreError::NotFound {
        entity_type: "task".into(),
        id: task_id.to_string(),
    }
}

impl TaskStore for MemoryTaskStore {
    fn get(&self, task_id: &str) -> Result<Task, CoreError> {
        self.lock()?
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| not_found(task_id))
    }

    fn insert(&self, task: Task) -> Result<(), CoreError> {
        let mut tasks = self.lock()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(CoreError::Validation(format!("task {} already exists", task.id)));
        }
        info!(task_id = %task.id, "task inserted");
        tasks.push(task);
        Ok(())
    }

    fn commit(&self, patch: &TaskPatch) -> Result<Task, CoreError> {
        let mut tasks = self.lock()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == patch.task_id)
            .ok_or_else(|| not_found(&patch.task_id))?;

        let mut updated = slot.clone();
        patch.apply_to(&mut updated)?;
        *slot = updated.clone();

        info!(
            task_id = %patch.task_id,
            from = %patch.expected_status,
            to = %updated.status,
            activities = patch.activities.len(),
            "task patch committed"
        );
        Ok(updated)
    }
}

/// Load `task_id`, validate `transition` against it, and commit the patch.
///
/// # Errors
///
/// Any validation error, or [`TransitionError::Core`] wrapping
/// [`CoreError::StaleStatus`] or [`CoreError::StalePrecondition`] when
/// another actor committed first.
pub fn run_transition(
    store: &impl TaskStore,
    task_id: &str,
    transition: &Transition,
    ctx: &TransitionContext,
) -> Result<Task, TransitionError> {
    let task = store.get(task_id).map_err(|e| match e {
        CoreError::NotFound { .. } => TransitionError::NotFound {
            what: "task",
            id: task_id.to_string(),
        },
        other => other.into(),
    })?;
    let patch = validate_transition(&task, task.status, transition, ctx)?;
    Ok(store.commit(&patch)?)
}

/// Load `task_id`, apply a session action, and commit the patch.
///
/// # Errors
///
/// [`SessionError::SessionConflict`] or a wrapped [`CoreError`].
pub fn run_session(
    store: &impl TaskStore,
    task_id: &str,
    action: &SessionAction,
    now: DateTime<Utc>,
) -> Result<Task, SessionError> {
    let task = store.get(task_id)?;
    let patch = apply_work_session(&task, action, now)?;
    Ok(store.commit(&patch)?)
}
