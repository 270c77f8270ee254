//! Command-line interface for taskboard.
//!
//! The binary is the composition root: it resolves config, opens one board,
//! loads it, applies a single command, and prints the result. Everything here
//! is testable without spawning a process.

mod run;


pub use run::{run, CliOutput};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskboard - categories of ordered tasks.
///
/// State is stored per project directory and seeded from `data/tasks.json`
/// the first time a board is opened.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project directory holding `.taskboard/config.yaml` and the seed.
    #[arg(long, global = true, default_value = ".")]
    pub base_dir: PathBuf,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // === Read-only view ===
    /// List categories; tasks are shown only for expanded categories.
    List {
        /// Expand the category with this id (repeatable)
        #[arg(short, long = "expand", value_name = "ID")]
        expand: Vec<i64>,

        /// Expand every category
        #[arg(short, long)]
        all: bool,
    },

    /// Print the whole board as JSON: categories, status, and error.
    Export,

    // === Categories ===
    /// Add a category at the end of the board.
    #[command(name = "add-category")]
    AddCategory {
        /// Category name (must not be blank)
        name: String,
    },

    /// Rename a category.
    #[command(name = "rename-category")]
    RenameCategory {
        /// Category ID
        id: i64,
        /// New name (must not be blank)
        name: String,
    },

    /// Delete a category together with its tasks.
    #[command(name = "delete-category")]
    DeleteCategory {
        /// Category ID
        id: i64,
    },

    // === Tasks ===
    /// Add a task to a category.
    #[command(name = "add-task")]
    AddTask {
        /// Category ID
        category: i64,

        /// Task title
        #[arg(short, long)]
        title: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Explicit task order (default: after the last task)
        #[arg(short, long)]
        order: Option<i64>,
    },

    /// Overwrite a task's title, description, and order.
    #[command(name = "update-task")]
    UpdateTask {
        /// Category ID holding the task
        category: i64,
        /// Task ID within the category
        task: i64,

        /// New title
        #[arg(short, long)]
        title: String,

        /// New description
        #[arg(short, long, default_value = "")]
        description: String,

        /// New task order
        #[arg(short, long)]
        order: i64,
    },

    /// Delete a task from a category.
    #[command(name = "delete-task")]
    DeleteTask {
        /// Category ID holding the task
        category: i64,
        /// Task ID within the category
        task: i64,
    },

    /// Move a task, as a drag and drop would (indices are 0-based).
    Move {
        /// Source category ID
        source_category: i64,
        /// Index of the task in the source category
        source_index: usize,
        /// Destination category ID
        destination_category: i64,
        /// Index to insert at in the destination category
        destination_index: usize,
    },

    // === Utility ===
    /// Discard the stored board and reload the seed.
    Reset,

    /// Show version information.
    Version,
}
