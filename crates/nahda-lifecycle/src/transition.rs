//! The approval state machine.
//!
//! ```text
//! in_progress ──submit──▶ pending_approval ──approve──▶ completed
//!      ▲                        │
//!      └────────resume──── rejected ◀──reject──┘
//! ```
//!
//! Reassignment changes the assignee without moving the status. Every guard
//! is evaluated against the caller's task snapshot; a failed guard returns an
//! error and produces no patch.

use chrono::{DateTime, Utc};
use tracing::debug;

use nahda_core::activity::ActivityKind;
use nahda_core::entities::{CompletionRequest, Task, TaskActivity, TaskDraft, TeamRef};
use nahda_core::enums::TaskStatus;
use nahda_core::errors::CoreError;
use nahda_core::ids::{PREFIX_TASK, generate_id};
use nahda_core::patch::{TaskPatch, TaskPatchBuilder};
use nahda_core::timing::seconds_between;

use crate::error::{Role, TransitionError};

/// A status-changing request against a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The assignee submits proof of completion.
    Submit { image_url: String },
    /// The team leader accepts the submission.
    Approve,
    /// The team leader sends the submission back.
    Reject { reason: String },
    /// The team leader hands the task to another member.
    Reassign { new_assignee: String },
    /// The assignee picks a rejected task back up.
    Resume,
}

impl Transition {
    /// Verb used in error messages and logs.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "submit",
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
            Self::Reassign { .. } => "reassign",
            Self::Resume => "resume",
        }
    }

    /// Status the task ends up in when this transition is applied to a task
    /// currently in `from`.
    #[must_use]
    pub const fn target(&self, from: TaskStatus) -> TaskStatus {
        match self {
            Self::Submit { .. } => TaskStatus::PendingApproval,
            Self::Approve => TaskStatus::Completed,
            Self::Reject { .. } => TaskStatus::Rejected,
            Self::Reassign { .. } => from,
            Self::Resume => TaskStatus::InProgress,
        }
    }

    const fn required_role(&self) -> Role {
        match self {
            Self::Submit { .. } | Self::Resume => Role::Assignee,
            Self::Approve | Self::Reject { .. } | Self::Reassign { .. } => Role::TeamLeader,
        }
    }

    /// Whether the transition may start from `from`.
    #[must_use]
    pub fn allowed_from(&self, from: TaskStatus) -> bool {
        match self {
            Self::Reassign { .. } => from.is_reassignable(),
            _ => from.can_transition_to(self.target(from)),
        }
    }
}

/// Who is acting, on behalf of which team, and when.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    pub actor_id: String,
    pub team: TeamRef,
    pub now: DateTime<Utc>,
}

impl TransitionContext {
    #[must_use]
    pub fn new(actor_id: impl Into<String>, team: TeamRef, now: DateTime<Utc>) -> Self {
        Self {
            actor_id: actor_id.into(),
            team,
            now,
        }
    }

    fn is_leader(&self) -> bool {
        self.actor_id == self.team.leader_id
    }

    fn holds(&self, role: Role, task: &Task) -> bool {
        match role {
            Role::Assignee => self.actor_id == task.assigned_to_id,
            Role::TeamLeader => self.is_leader(),
            Role::Participant => self.is_leader() || self.actor_id == task.assigned_to_id,
        }
    }
}

/// Validate `transition` against `task` and produce the patch that applies it.
///
/// `expected_from` is the status the caller observed when it decided to act.
/// The returned patch is pinned to that status so that
/// [`TaskPatch::apply_to`] fails if another actor moved the task first.
///
/// # Errors
///
/// - [`TransitionError::InvalidTransition`] if `task.status` differs from
///   `expected_from`, the transition is not allowed from the current status,
///   or a required field (image, reason, assignee) is blank or unchanged.
/// - [`TransitionError::Unauthorized`] if the actor lacks the required role
///   or belongs to another team.
/// - [`TransitionError::Core`] if an activity ID cannot be generated.
pub fn validate_transition(
    task: &Task,
    expected_from: TaskStatus,
    transition: &Transition,
    ctx: &TransitionContext,
) -> Result<TaskPatch, TransitionError> {
    let action = transition.action();

    if task.status != expected_from {
        return Err(invalid(
            task,
            action,
            format!("task is {}, caller expected {expected_from}", task.status),
        ));
    }
    if !transition.allowed_from(task.status) {
        return Err(invalid(
            task,
            action,
            format!(
                "{action} is not allowed from {}; allowed next states: {:?}",
                task.status,
                task.status.allowed_next_states()
            ),
        ));
    }

    let required = transition.required_role();
    if !ctx.holds(required, task) {
        return Err(unauthorized(task, ctx, action, required));
    }

    let now = ctx.now;
    let base = TaskPatchBuilder::new(task.id.clone(), expected_from)
        .expected_assignee(&task.assigned_to_id)
        .modified_by(&ctx.actor_id, now);

    let patch = match transition {
        Transition::Submit { image_url } => {
            let image_url = image_url.trim();
            if image_url.is_empty() {
                return Err(invalid(task, action, "a proof image is required".into()));
            }
            base.status(TaskStatus::PendingApproval)
                .image_url(image_url)
                .completion_request(CompletionRequest {
                    submitted_at: now,
                    submitted_by: ctx.actor_id.clone(),
                    image_url: image_url.to_string(),
                    reviewed_at: None,
                    reviewed_by: None,
                })
                .activity(TaskActivity::record(
                    &ctx.actor_id,
                    ActivityKind::Submitted {
                        image_url: image_url.to_string(),
                    },
                    now,
                )?)
                .build()
        }
        Transition::Approve => {
            let started = task.started_at.unwrap_or(now);
            let finish_time = seconds_between(started, now).max(0.0);
            let mut builder = base
                .status(TaskStatus::Completed)
                .is_completed(true)
                .completed_at(now)
                .finish_time(finish_time);
            if let Some(request) = &task.completion_request {
                builder = builder.completion_request(request.reviewed(&ctx.actor_id, now));
            }
            builder
                .activity(TaskActivity::record(
                    &ctx.actor_id,
                    ActivityKind::Approved { finish_time },
                    now,
                )?)
                .build()
        }
        Transition::Reject { reason } => {
            let reason = reason.trim();
            if reason.is_empty() {
                return Err(invalid(task, action, "a rejection reason is required".into()));
            }
            let mut builder = base
                .status(TaskStatus::Rejected)
                .is_completed(false)
                .rejection_reason(Some(reason.to_string()));
            if let Some(request) = &task.completion_request {
                builder = builder.completion_request(request.reviewed(&ctx.actor_id, now));
            }
            builder
                .activity(TaskActivity::record(
                    &ctx.actor_id,
                    ActivityKind::Rejected {
                        reason: reason.to_string(),
                    },
                    now,
                )?)
                .build()
        }
        Transition::Reassign { new_assignee } => {
            if task.team_id != ctx.team.id {
                return Err(unauthorized(task, ctx, action, required));
            }
            let new_assignee = new_assignee.trim();
            if new_assignee.is_empty() {
                return Err(invalid(task, action, "a new assignee is required".into()));
            }
            if new_assignee == task.assigned_to_id {
                return Err(invalid(
                    task,
                    action,
                    format!("task is already assigned to {new_assignee}"),
                ));
            }
            base.assigned_to_id(new_assignee)
                .activity(TaskActivity::record(
                    &ctx.actor_id,
                    ActivityKind::Reassigned {
                        from: task.assigned_to_id.clone(),
                        to: new_assignee.to_string(),
                    },
                    now,
                )?)
                .build()
        }
        Transition::Resume => base
            .status(TaskStatus::InProgress)
            .rejection_reason(None)
            .activity(TaskActivity::record(&ctx.actor_id, ActivityKind::Resumed, now)?)
            .build(),
    };

    debug!(
        task_id = %task.id,
        action,
        from = %expected_from,
        to = %patch.resulting_status(),
        "transition validated"
    );
    Ok(patch)
}

/// Build a new task from `draft`, already `in_progress` with its clock
/// started at `now`.
///
/// Duplicate entries in `draft.depends_on` are dropped, keeping first
/// occurrence order.
///
/// # Errors
///
/// - [`CoreError::Validation`] (wrapped) if the title or assignee is blank.
/// - [`CoreError::IdGeneration`] (wrapped) if no ID can be minted.
pub fn create_task(
    draft: TaskDraft,
    creator_id: &str,
    now: DateTime<Utc>,
) -> Result<Task, TransitionError> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(CoreError::Validation("task title must not be blank".into()).into());
    }
    if draft.assigned_to_id.trim().is_empty() {
        return Err(CoreError::Validation("task must have an assignee".into()).into());
    }

    let mut depends_on: Vec<String> = Vec::with_capacity(draft.depends_on.len());
    for dep in draft.depends_on {
        if !depends_on.contains(&dep) {
            depends_on.push(dep);
        }
    }

    let created = TaskActivity::record(
        creator_id,
        ActivityKind::Created {
            title: title.clone(),
        },
        now,
    )?;

    let task = Task {
        id: generate_id(PREFIX_TASK)?,
        team_id: draft.team_id,
        title,
        description: draft.description,
        assigned_to_id: draft.assigned_to_id,
        assigned_to_name: draft.assigned_to_name,
        image_url: None,
        is_completed: false,
        priority: draft.priority,
        status: TaskStatus::InProgress,
        due_date: draft.due_date,
        depends_on,
        activity_log: vec![created],
        completion_request: None,
        rejection_reason: None,
        started_at: Some(now),
        completed_at: None,
        time_spent: 0.0,
        work_sessions: Vec::new(),
        finish_time: None,
        last_modified_at: Some(now),
        last_modified_by: Some(creator_id.to_string()),
    };
    debug!(task_id = %task.id, team_id = %task.team_id, "task created");
    Ok(task)
}

pub(crate) fn invalid(task: &Task, action: &'static str, reason: String) -> TransitionError {
    TransitionError::InvalidTransition {
        task_id: task.id.clone(),
        action,
        from: task.status,
        reason,
    }
}

pub(crate) fn unauthorized(
    task: &Task,
    ctx: &TransitionContext,
    action: &'static str,
    required: Role,
) -> TransitionError {
    TransitionError::Unauthorized {
        task_id: task.id.clone(),
        actor: ctx.actor_id.clone(),
        action,
        required,
    }
}
