use clap::Subcommand;

/// Work session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Open a work session for a user on a task.
    Start {
        #[arg(long)]
        task: String,
        /// User starting work.
        #[arg(long)]
        user: String,
    },
    /// Close an open work session and add its duration to the task.
    End {
        #[arg(long)]
        task: String,
        /// Session ID returned by `session start`.
        #[arg(long)]
        session: String,
    },
}
