use std::collections::BTreeMap;

use serde::Serialize;

use nahda_analytics::TimeAnalytics;
use nahda_core::enums::{CompletionTrend, TaskPriority};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TrendResponse {
    trend: CompletionTrend,
    slope: Option<f64>,
    average_completion_time: f64,
    by_priority: BTreeMap<TaskPriority, f64>,
}

/// Handle `nahda trend`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analytics = TimeAnalytics::with_config(&ctx.snapshot.tasks, &ctx.config.analytics);
    let response = TrendResponse {
        trend: analytics.completion_trend(),
        slope: analytics.trend_slope(),
        average_completion_time: analytics.average_completion_time(),
        by_priority: analytics.completion_times_by_priority(),
    };
    output(&response, flags.format)
}
