use nahda_core::entities::{Task, TaskDraft};
use nahda_core::enums::TaskPriority;
use nahda_lifecycle::create_task;
use nahda_lifecycle::store::TaskStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

fn run(args: &CreateArgs, ctx: &mut AppContext) -> anyhow::Result<Task> {
    let priority: TaskPriority = match args.priority.as_deref() {
        Some(raw) => parse_enum(raw, "priority")?,
        None => TaskPriority::default(),
    };
    for dep in &args.depends_on {
        ctx.task(dep)?;
    }

    let draft = TaskDraft {
        team_id: ctx.snapshot.team.id.clone(),
        title: args.title.clone(),
        description: args.description.clone(),
        assigned_to_id: args.assignee.clone(),
        assigned_to_name: None,
        priority,
        due_date: args.due,
        depends_on: args.depends_on.clone(),
    };
    let task = create_task(draft, &args.actor, ctx.now)?;
    ctx.with_store(|store| {
        store.insert(task.clone())?;
        Ok(task)
    })
}

/// Handle `nahda create`.
pub fn handle(args: &CreateArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = run(args, ctx)?;
    output(&task, flags.format)
}
