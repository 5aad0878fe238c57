use nahda_core::entities::Task;
use nahda_core::enums::TaskPriority;
use nahda_lifecycle::edit;
use nahda_lifecycle::store::TaskStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EditCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

fn run(action: &EditCommands, ctx: &mut AppContext) -> anyhow::Result<Task> {
    let target = match action {
        EditCommands::AddDependency { task, .. }
        | EditCommands::RemoveDependency { task, .. }
        | EditCommands::Priority { task, .. }
        | EditCommands::Due { task, .. } => task,
    };
    let task = ctx.task(&target.task)?.clone();
    let tctx = ctx.transition_ctx(&target.actor);

    let patch = match action {
        EditCommands::AddDependency { on, .. } => {
            ctx.task(on)?;
            edit::add_dependency(&task, on, &tctx)?
        }
        EditCommands::RemoveDependency { on, .. } => edit::remove_dependency(&task, on, &tctx)?,
        EditCommands::Priority { priority, .. } => {
            let priority: TaskPriority = parse_enum(priority, "priority")?;
            edit::change_priority(&task, priority, &tctx)?
        }
        EditCommands::Due { due, .. } => edit::change_due_date(&task, *due, &tctx)?,
    };
    ctx.with_store(|store| Ok(store.commit(&patch)?))
}

/// Handle `nahda edit`.
pub fn handle(action: &EditCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = run(action, ctx)?;
    output(&task, flags.format)
}
