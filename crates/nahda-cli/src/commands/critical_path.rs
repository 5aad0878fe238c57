use nahda_config::PassOrder;
use nahda_schedule::CriticalPathAnalyzer;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CriticalPathArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

fn analyzer(args: &CriticalPathArgs, ctx: &AppContext) -> anyhow::Result<CriticalPathAnalyzer> {
    let pass_order: PassOrder = match args.pass_order.as_deref() {
        Some(raw) => parse_enum(raw, "pass order")?,
        None => ctx.config.schedule.pass_order,
    };
    Ok(CriticalPathAnalyzer::new(pass_order))
}

/// Handle `nahda critical-path`.
pub fn handle(args: &CriticalPathArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analyzer = analyzer(args, ctx)?;
    let deps = ctx.snapshot.all_dependencies();

    if args.path_only {
        let tasks = analyzer.critical_tasks(&ctx.snapshot.tasks, &deps, ctx.now)?;
        return output(&tasks, flags.format);
    }
    let report = analyzer.analyze(&ctx.snapshot.tasks, &deps, ctx.now)?;
    output(&report, flags.format)
}
