use chrono::TimeDelta;
use nahda_analytics::{Burndown, Period};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BurndownArgs;
use crate::context::AppContext;
use crate::output::output;

fn build(args: &BurndownArgs, ctx: &AppContext) -> Burndown {
    let period = Period::trailing(ctx.now, TimeDelta::days(i64::from(args.days)));
    nahda_analytics::burndown(&ctx.snapshot.tasks, period.start, period.end)
}

/// Handle `nahda burndown`.
pub fn handle(args: &BurndownArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args, ctx), flags.format)
}
