use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub snapshot: PathBuf,
    pub config: Option<PathBuf>,
    pub now: Option<DateTime<Utc>>,
}
