use chrono::TimeDelta;
use nahda_analytics::TeamVelocity;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `nahda velocity`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sprint = TimeDelta::days(i64::from(ctx.config.analytics.sprint_days));
    let velocity =
        TeamVelocity::calculate_current(&ctx.snapshot.team.id, &ctx.snapshot.tasks, sprint, ctx.now);
    output(&velocity, flags.format)
}
