use clap::{Args, Subcommand};

/// The task being changed and who is changing it.
#[derive(Clone, Debug, Args)]
pub struct TaskActor {
    /// Task ID.
    #[arg(long)]
    pub task: String,

    /// User performing the action.
    #[arg(long)]
    pub actor: String,
}

/// Approval workflow commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TransitionCommands {
    /// Submit finished work with a photo for approval (assignee).
    Submit {
        #[command(flatten)]
        task: TaskActor,
        /// Photo proving the work is done.
        #[arg(long)]
        image_url: String,
    },
    /// Approve a pending submission (team leader).
    Approve {
        #[command(flatten)]
        task: TaskActor,
    },
    /// Reject a pending submission (team leader).
    Reject {
        #[command(flatten)]
        task: TaskActor,
        #[arg(long)]
        reason: String,
    },
    /// Hand the task to another team member (team leader).
    Reassign {
        #[command(flatten)]
        task: TaskActor,
        /// New assignee.
        #[arg(long)]
        to: String,
    },
    /// Resume work on a rejected task (assignee).
    Resume {
        #[command(flatten)]
        task: TaskActor,
    },
}
