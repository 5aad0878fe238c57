use serde::Serialize;

use nahda_analytics::TimeAnalytics;
use nahda_core::enums::TaskPriority;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EstimateArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EstimateResponse {
    task_id: String,
    priority: TaskPriority,
    /// Predicted seconds to complete.
    estimate: f64,
    /// Seconds already worked.
    time_spent: f64,
}

fn build(args: &EstimateArgs, ctx: &AppContext) -> anyhow::Result<EstimateResponse> {
    let task = ctx.task(&args.task)?;
    let analytics = TimeAnalytics::with_config(&ctx.snapshot.tasks, &ctx.config.analytics);
    Ok(EstimateResponse {
        task_id: task.id.clone(),
        priority: task.priority,
        estimate: analytics.estimate_completion_time(task),
        time_spent: nahda_core::timing::sanitize_secs(task.time_spent),
    })
}

/// Handle `nahda estimate`.
pub fn handle(args: &EstimateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args, ctx)?, flags.format)
}
