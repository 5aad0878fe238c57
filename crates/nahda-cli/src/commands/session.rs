use nahda_core::entities::Task;
use nahda_lifecycle::SessionAction;
use nahda_lifecycle::store::run_session;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::AppContext;
use crate::output::output;

fn run(action: &SessionCommands, ctx: &mut AppContext) -> anyhow::Result<Task> {
    let (task_id, session_action) = match action {
        SessionCommands::Start { task, user } => (
            task,
            SessionAction::Start {
                user_id: user.clone(),
            },
        ),
        SessionCommands::End { task, session } => (
            task,
            SessionAction::End {
                session_id: session.clone(),
            },
        ),
    };
    let now = ctx.now;
    ctx.with_store(|store| Ok(run_session(store, task_id, &session_action, now)?))
}

/// Handle `nahda session`.
pub fn handle(
    action: &SessionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let task = run(action, ctx)?;
    output(&task, flags.format)
}
