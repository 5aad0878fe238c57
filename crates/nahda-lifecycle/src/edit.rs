//! Field edits that keep the status: dependencies, priority, due date.
//!
//! Either the assignee or the team leader may edit a task until it is
//! completed.

use chrono::{DateTime, Utc};
use tracing::debug;

use nahda_core::activity::ActivityKind;
use nahda_core::entities::{Task, TaskActivity};
use nahda_core::enums::TaskPriority;
use nahda_core::patch::{TaskPatch, TaskPatchBuilder};

use crate::error::{Role, TransitionError};
use crate::transition::{TransitionContext, invalid, unauthorized};

fn guard(task: &Task, ctx: &TransitionContext, action: &'static str) -> Result<(), TransitionError> {
    if task.status.is_terminal() {
        return Err(invalid(task, action, "completed tasks cannot be edited".into()));
    }
    let participant = ctx.actor_id == task.assigned_to_id || ctx.actor_id == ctx.team.leader_id;
    if !participant {
        return Err(unauthorized(task, ctx, action, Role::Participant));
    }
    Ok(())
}

fn finish(
    task: &Task,
    ctx: &TransitionContext,
    builder: TaskPatchBuilder,
    kind: ActivityKind,
) -> Result<TaskPatch, TransitionError> {
    let action = kind.as_str();
    let patch = builder
        .expected_assignee(&task.assigned_to_id)
        .modified_by(&ctx.actor_id, ctx.now)
        .activity(TaskActivity::record(&ctx.actor_id, kind, ctx.now)?)
        .build();
    debug!(task_id = %task.id, action, "edit validated");
    Ok(patch)
}

/// Make `task` depend on `depends_on`.
///
/// # Errors
///
/// [`TransitionError::InvalidTransition`] for a self-dependency or an edge
/// that already exists; [`TransitionError::Unauthorized`] for non-participants.
pub fn add_dependency(
    task: &Task,
    depends_on: &str,
    ctx: &TransitionContext,
) -> Result<TaskPatch, TransitionError> {
    const ACTION: &str = "add dependency to";
    guard(task, ctx, ACTION)?;
    if depends_on == task.id {
        return Err(invalid(task, ACTION, "a task cannot depend on itself".into()));
    }
    if task.depends_on.iter().any(|d| d == depends_on) {
        return Err(invalid(
            task,
            ACTION,
            format!("already depends on {depends_on}"),
        ));
    }

    let mut deps = task.depends_on.clone();
    deps.push(depends_on.to_string());
    finish(
        task,
        ctx,
        TaskPatchBuilder::for_task(task).depends_on(deps),
        ActivityKind::DependencyAdded {
            depends_on: depends_on.to_string(),
        },
    )
}

/// Drop the edge from `task` to `depends_on`.
///
/// # Errors
///
/// [`TransitionError::NotFound`] if the edge does not exist.
pub fn remove_dependency(
    task: &Task,
    depends_on: &str,
    ctx: &TransitionContext,
) -> Result<TaskPatch, TransitionError> {
    guard(task, ctx, "remove dependency from")?;
    if !task.depends_on.iter().any(|d| d == depends_on) {
        return Err(TransitionError::NotFound {
            what: "dependency",
            id: depends_on.to_string(),
        });
    }

    let deps: Vec<String> = task
        .depends_on
        .iter()
        .filter(|d| *d != depends_on)
        .cloned()
        .collect();
    finish(
        task,
        ctx,
        TaskPatchBuilder::for_task(task).depends_on(deps),
        ActivityKind::DependencyRemoved {
            depends_on: depends_on.to_string(),
        },
    )
}

/// # Errors
///
/// [`TransitionError::InvalidTransition`] if the priority is unchanged.
pub fn change_priority(
    task: &Task,
    priority: TaskPriority,
    ctx: &TransitionContext,
) -> Result<TaskPatch, TransitionError> {
    const ACTION: &str = "change priority of";
    guard(task, ctx, ACTION)?;
    if task.priority == priority {
        return Err(invalid(task, ACTION, format!("priority is already {priority}")));
    }
    finish(
        task,
        ctx,
        TaskPatchBuilder::for_task(task).priority(priority),
        ActivityKind::PriorityChanged {
            from: task.priority,
            to: priority,
        },
    )
}

/// Set or clear the due date.
///
/// # Errors
///
/// [`TransitionError::InvalidTransition`] if the due date is unchanged.
pub fn change_due_date(
    task: &Task,
    due_date: Option<DateTime<Utc>>,
    ctx: &TransitionContext,
) -> Result<TaskPatch, TransitionError> {
    const ACTION: &str = "change due date of";
    guard(task, ctx, ACTION)?;
    if task.due_date == due_date {
        return Err(invalid(task, ACTION, "due date is unchanged".into()));
    }
    finish(
        task,
        ctx,
        TaskPatchBuilder::for_task(task).due_date(due_date),
        ActivityKind::DueDateChanged {
            from: task.due_date,
            to: due_date,
        },
    )
}
