use std::collections::BTreeMap;

use serde::Serialize;

use nahda_analytics::{PriorityStatistics, TeamAnalytics};
use nahda_core::enums::TaskPriority;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TeamStatsResponse {
    team: TeamAnalytics,
    priorities: BTreeMap<TaskPriority, PriorityStatistics>,
}

fn build(ctx: &AppContext) -> TeamStatsResponse {
    TeamStatsResponse {
        team: TeamAnalytics::calculate(&ctx.snapshot.team, &ctx.snapshot.tasks),
        priorities: PriorityStatistics::by_priority(&ctx.snapshot.tasks),
    }
}

/// Handle `nahda team-stats`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(ctx), flags.format)
}
