use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("nahda error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;

    let config = load_config(&flags)?;
    let mut ctx = context::AppContext::init(&flags, config)
        .context("failed to initialize nahda application context")?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags)
}

fn load_config(flags: &cli::GlobalFlags) -> anyhow::Result<nahda_config::EngineConfig> {
    let config = match &flags.config {
        Some(path) => nahda_config::EngineConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from '{}'", path.display()))?,
        None => nahda_config::EngineConfig::load_with_dotenv()
            .context("failed to load nahda configuration")?,
    };
    tracing::debug!(
        pass_order = %config.schedule.pass_order,
        sprint_days = config.analytics.sprint_days,
        "configuration loaded"
    );
    Ok(config)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("NAHDA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
