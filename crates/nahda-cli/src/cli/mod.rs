use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `nahda` binary.
#[derive(Debug, Parser)]
#[command(
    name = "nahda",
    version,
    about = "Nahda - task lifecycle, critical path, and team analytics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Snapshot file holding the team, its tasks, and dependency edges
    #[arg(short, long, global = true, default_value = "nahda.json")]
    pub snapshot: PathBuf,

    /// Config file, used instead of the user and project config files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            snapshot: self.snapshot.clone(),
            config: self.config.clone(),
            now: self.now,
        }
    }
}
