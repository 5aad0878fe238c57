use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::TaskActor;

/// Field edits on an open task.
#[derive(Clone, Debug, Subcommand)]
pub enum EditCommands {
    /// Make the task wait for another task.
    AddDependency {
        #[command(flatten)]
        task: TaskActor,
        /// Task to wait for.
        #[arg(long)]
        on: String,
    },
    /// Drop a dependency.
    RemoveDependency {
        #[command(flatten)]
        task: TaskActor,
        #[arg(long)]
        on: String,
    },
    /// Change the priority (low, medium, high).
    Priority {
        #[command(flatten)]
        task: TaskActor,
        #[arg(long)]
        priority: String,
    },
    /// Set or clear the due date.
    Due {
        #[command(flatten)]
        task: TaskActor,
        /// New due date (RFC 3339); omit to clear.
        #[arg(long)]
        due: Option<DateTime<Utc>>,
    },
}
