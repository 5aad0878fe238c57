use chrono::TimeDelta;
use nahda_analytics::{PerformanceMetrics, Period};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MetricsArgs;
use crate::context::AppContext;
use crate::output::output;

fn build(args: &MetricsArgs, ctx: &AppContext) -> PerformanceMetrics {
    let period = Period::trailing(ctx.now, TimeDelta::days(i64::from(args.days)));
    PerformanceMetrics::calculate(&args.user, &ctx.snapshot.tasks, period)
}

/// Handle `nahda metrics`.
pub fn handle(args: &MetricsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args, ctx), flags.format)
}
