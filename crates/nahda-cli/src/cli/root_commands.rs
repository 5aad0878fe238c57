use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::cli::subcommands::{EditCommands, SessionCommands, TransitionCommands};

/// Widest `--days` window the analytics commands accept.
pub const MAX_DAYS: i64 = 3650;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Earliest/latest schedule and the critical path.
    CriticalPath(CriticalPathArgs),
    /// Performance metrics for one user over a trailing period.
    Metrics(MetricsArgs),
    /// Predicted completion time for a task.
    Estimate(EstimateArgs),
    /// Whether recent completions are getting faster or slower.
    Trend,
    /// Team velocity over the current sprint.
    Velocity,
    /// Per-priority statistics and team breakdown.
    TeamStats,
    /// Ideal and actual burndown series.
    Burndown(BurndownArgs),
    /// Activity across all tasks, newest first.
    Activity(ActivityArgs),
    /// Create a task.
    Create(CreateArgs),
    /// Move a task through the approval workflow.
    Transition {
        #[command(subcommand)]
        action: TransitionCommands,
    },
    /// Change a task's dependencies, priority, or due date.
    Edit {
        #[command(subcommand)]
        action: EditCommands,
    },
    /// Start or end a work session.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CriticalPathArgs {
    /// Override the configured pass order (topological, input-order).
    #[arg(long)]
    pub pass_order: Option<String>,

    /// Print only the critical tasks instead of the full schedule.
    #[arg(long)]
    pub path_only: bool,
}

#[derive(Clone, Debug, Args)]
pub struct MetricsArgs {
    /// User whose assigned tasks are measured.
    #[arg(long)]
    pub user: String,

    /// Length of the trailing period in days.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS))]
    pub days: u32,
}

#[derive(Clone, Debug, Args)]
pub struct EstimateArgs {
    /// Task to estimate.
    #[arg(long)]
    pub task: String,
}

#[derive(Clone, Debug, Args)]
pub struct BurndownArgs {
    /// Days back from now where the chart starts.
    #[arg(long, default_value_t = 14, value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS))]
    pub days: u32,
}

#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// Only show activity for this task.
    #[arg(long)]
    pub task: Option<String>,

    /// Maximum number of entries.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Task title.
    #[arg(long)]
    pub title: String,

    /// User the task is assigned to.
    #[arg(long)]
    pub assignee: String,

    /// User creating the task.
    #[arg(long)]
    pub actor: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// low, medium, high
    #[arg(long)]
    pub priority: Option<String>,

    /// Due date (RFC 3339).
    #[arg(long)]
    pub due: Option<DateTime<Utc>>,

    /// Tasks this one waits for.
    #[arg(long = "depends-on")]
    pub depends_on: Vec<String>,
}
