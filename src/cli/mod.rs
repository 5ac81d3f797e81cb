//! Command-line front-end for task-keeper.
//!
//! Each invocation restores the saved session, applies one command and
//! exits. The commands mirror the actions of an interactive to-do screen:
//! log in, add, edit, toggle, delete and list tasks.

mod run;

#[cfg(test)]
mod tests;

pub use run::{run, run_command, CliOutput};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Task keeper - per-user to-do lists.
///
/// Log in with any name; each name (case and surrounding spaces ignored)
/// has its own task list. Logging out keeps every list.
#[derive(Parser, Debug)]
#[command(name = "task-keeper")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ~/.task-keeper/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in as a user (at least 2 characters).
    Login {
        /// Username
        username: String,
    },

    /// Log out. Task lists are kept.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Add a task to the top of the list.
    Add {
        /// Title for the task (required)
        #[arg(short, long)]
        title: String,

        /// Description with more details
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: high, medium or low
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Due date, e.g. 2024-12-31
        #[arg(long)]
        due: Option<String>,

        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },

    /// Edit a task's fields.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Edit {
        /// Task ID
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority: high, medium or low
        #[arg(short, long)]
        priority: Option<String>,

        /// New due date
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Mark a task done, or not done again.
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: String,
    },

    /// List tasks with counts.
    List {
        /// Show all, completed or pending tasks
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Only tasks whose title or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every user with a stored task list.
    Users,

    /// Dump every stored key with a short description.
    Debug,
}

impl Command {
    /// Returns true if this command acts on the logged-in user's tasks.
    #[must_use]
    pub const fn needs_session(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Edit { .. }
                | Self::Toggle { .. }
                | Self::Delete { .. }
                | Self::List { .. }
        )
    }
}
