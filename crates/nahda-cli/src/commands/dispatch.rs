use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::CriticalPath(args) => commands::critical_path::handle(&args, ctx, flags),
        Commands::Metrics(args) => commands::metrics::handle(&args, ctx, flags),
        Commands::Estimate(args) => commands::estimate::handle(&args, ctx, flags),
        Commands::Trend => commands::trend::handle(ctx, flags),
        Commands::Velocity => commands::velocity::handle(ctx, flags),
        Commands::TeamStats => commands::team_stats::handle(ctx, flags),
        Commands::Burndown(args) => commands::burndown::handle(&args, ctx, flags),
        Commands::Activity(args) => commands::activity::handle(&args, ctx, flags),
        Commands::Create(args) => commands::create::handle(&args, ctx, flags),
        Commands::Transition { action } => commands::transition::handle(&action, ctx, flags),
        Commands::Edit { action } => commands::edit::handle(&action, ctx, flags),
        Commands::Session { action } => commands::session::handle(&action, ctx, flags),
    }
}
