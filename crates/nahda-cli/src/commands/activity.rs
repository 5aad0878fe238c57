use nahda_analytics::{FeedEntry, activity_feed};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivityArgs;
use crate::context::AppContext;
use crate::output::output;

fn build(args: &ActivityArgs, ctx: &AppContext) -> Vec<FeedEntry> {
    let mut feed = activity_feed(&ctx.snapshot.tasks);
    if let Some(task_id) = &args.task {
        feed.retain(|entry| &entry.task_id == task_id);
    }
    if let Some(limit) = args.limit {
        feed.truncate(limit);
    }
    feed
}

/// Handle `nahda activity`.
pub fn handle(args: &ActivityArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args, ctx), flags.format)
}
