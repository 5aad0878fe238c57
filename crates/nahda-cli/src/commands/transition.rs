use nahda_core::entities::Task;
use nahda_lifecycle::Transition;
use nahda_lifecycle::store::run_transition;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{TaskActor, TransitionCommands};
use crate::context::AppContext;
use crate::output::output;

fn request(action: &TransitionCommands) -> (&TaskActor, Transition) {
    match action {
        TransitionCommands::Submit { task, image_url } => (
            task,
            Transition::Submit {
                image_url: image_url.clone(),
            },
        ),
        TransitionCommands::Approve { task } => (task, Transition::Approve),
        TransitionCommands::Reject { task, reason } => (
            task,
            Transition::Reject {
                reason: reason.clone(),
            },
        ),
        TransitionCommands::Reassign { task, to } => (
            task,
            Transition::Reassign {
                new_assignee: to.clone(),
            },
        ),
        TransitionCommands::Resume { task } => (task, Transition::Resume),
    }
}

fn run(action: &TransitionCommands, ctx: &mut AppContext) -> anyhow::Result<Task> {
    let (target, transition) = request(action);
    let tctx = ctx.transition_ctx(&target.actor);
    ctx.with_store(|store| Ok(run_transition(store, &target.task, &transition, &tctx)?))
}

/// Handle `nahda transition`.
pub fn handle(
    action: &TransitionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = run(action, ctx)?;
    output(&task, flags.format)
}

#[cfg(test)]
mod tests {
    use nahda_core::enums::TaskStatus;
    use pretty_assertions::assert_eq;

    use crate::context::read_snapshot;
    use crate::context::tests::context_in;

    use super::*;

    fn actor(task: &str, actor: &str) -> TaskActor {
        TaskActor {
            task: task.into(),
            actor: actor.into(),
        }
    }

    #[test]
    fn submit_then_approve_is_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, flags) = context_in(dir.path());

        let submitted = run(
            &TransitionCommands::Submit {
                task: actor("tsk-2", "usr-a"),
                image_url: "https://img.example/repair.jpg".into(),
            },
            &mut ctx,
        )
        .unwrap();
        assert_eq!(submitted.status, TaskStatus::PendingApproval);

        let approved = run(
            &TransitionCommands::Approve {
                task: actor("tsk-2", "usr-lead"),
            },
            &mut ctx,
        )
        .unwrap();
        assert_eq!(approved.status, TaskStatus::Completed);
        assert!(approved.is_completed);

        let saved = read_snapshot(&flags.snapshot).unwrap();
        assert_eq!(saved.task("tsk-2").unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn unauthorized_approval_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, flags) = context_in(dir.path());
        run(
            &TransitionCommands::Submit {
                task: actor("tsk-3", "usr-b"),
                image_url: "https://img.example/paint.jpg".into(),
            },
            &mut ctx,
        )
        .unwrap();

        let error = run(
            &TransitionCommands::Approve {
                task: actor("tsk-3", "usr-b"),
            },
            &mut ctx,
        )
        .unwrap_err();
        assert!(error.to_string().contains("only the team leader may"));
        let saved = read_snapshot(&flags.snapshot).unwrap();
        assert_eq!(saved.task("tsk-3").unwrap().status, TaskStatus::PendingApproval);
    }

    #[test]
    fn unknown_task_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _) = context_in(dir.path());
        let error = run(
            &TransitionCommands::Resume {
                task: actor("tsk-404", "usr-a"),
            },
            &mut ctx,
        )
        .unwrap_err();
        assert!(error.to_string().contains("tsk-404"));
    }
}
