//! Command execution for the CLI.

use crate::board::{Board, Category, CategoryId, DragLocation, DragResult};
use crate::cli::{Cli, Command};
use crate::config::BoardConfig;
use crate::traits::KeyValueStorage;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a parsed command line.
#[must_use]
pub fn run(cli: Cli) -> CliOutput {
    if cli.command == Command::Version {
        return version_output();
    }

    let config = match BoardConfig::resolve(&cli.base_dir) {
        Ok(c) => c,
        Err(e) => return error_output(format!("Error loading config: {e}")),
    };
    run_with_config(cli.command, &config, &cli.base_dir)
}

/// Run a command against the board described by `config`.
#[must_use]
pub fn run_with_config(command: Command, config: &BoardConfig, base_dir: &Path) -> CliOutput {
    let mut board = match config.open_board(base_dir) {
        Ok(b) => b,
        Err(e) => return error_output(format!("Error opening board: {e}")),
    };
    let seed = config.seed_in(base_dir);

    if let Err(e) = board.fetch_tasks(&seed) {
        match command {
            // Reset has to work when the stored snapshot is unreadable.
            Command::Reset => {}
            Command::Export => return json_output(&board.snapshot()),
            _ => return error_output(format!("Error loading board: {e}")),
        }
    }

    match command {
        Command::List { expand, all } => list(board.categories(), &expand, all),
        Command::Export => json_output(&board.snapshot()),
        Command::AddCategory { name } => add_category(&mut board, name),
        Command::RenameCategory { id, name } => {
            report(board.update_category(id, name), format!("Renamed category {id}"))
        }
        Command::DeleteCategory { id } => {
            report(board.delete_category(id), format!("Deleted category {id}"))
        }
        Command::AddTask { category, title, description, order } => {
            add_task(&mut board, category, title, description, order)
        }
        Command::UpdateTask { category, task, title, description, order } => report(
            board.update_task(task, title, description, order, category),
            format!("Updated task {task} in category {category}"),
        ),
        Command::DeleteTask { category, task } => report(
            board.delete_task(task, category),
            format!("Deleted task {task} from category {category}"),
        ),
        Command::Move {
            source_category,
            source_index,
            destination_category,
            destination_index,
        } => {
            let drag = DragResult {
                source: DragLocation { category_id: source_category, index: source_index },
                destination: Some(DragLocation {
                    category_id: destination_category,
                    index: destination_index,
                }),
            };
            report(board.apply_drag_result(drag).map(|_| ()), "Moved task".to_string())
        }
        Command::Reset => match board.reset(&seed) {
            Ok(()) => success_output(format!(
                "Board reset from {} ({} categories)",
                seed.path().display(),
                board.categories().len()
            )),
            Err(e) => error_output(format!("Error resetting board: {e}")),
        },
        Command::Version => version_output(),
    }
}

// === Views ===

fn list(categories: &[Category], expand: &[CategoryId], all: bool) -> CliOutput {
    if categories.is_empty() {
        return success_output("No categories".to_string());
    }

    let mut lines = Vec::new();
    for category in categories {
        let expanded = all || expand.contains(&category.id);
        let marker = if expanded { "[-]" } else { "[+]" };
        let count = category.tasks.len();
        let noun = if count == 1 { "task" } else { "tasks" };
        lines.push(format!("{marker} {}: {} ({count} {noun})", category.id, category.name));

        if expanded {
            for task in &category.tasks {
                if task.description.is_empty() {
                    lines.push(format!("    {}. {} (#{})", task.task_order, task.title, task.id));
                } else {
                    lines.push(format!(
                        "    {}. {} (#{}) - {}",
                        task.task_order, task.title, task.id, task.description
                    ));
                }
            }
        }
    }
    success_output(lines.join("\n"))
}

// === Mutations ===

fn add_category<S: KeyValueStorage>(board: &mut Board<S>, name: String) -> CliOutput {
    match board.add_category(name) {
        Ok(()) => {
            let Some(added) = board.categories().last() else {
                return error_output("Category was not added".to_string());
            };
            success_output(format!("Added category {}: {}", added.id, added.name))
        }
        Err(e) => error_output(e.to_string()),
    }
}

fn add_task<S: KeyValueStorage>(
    board: &mut Board<S>,
    category_id: CategoryId,
    title: String,
    description: String,
    order: Option<i64>,
) -> CliOutput {
    if let Err(e) = board.add_task(category_id, title, description, order) {
        return error_output(e.to_string());
    }
    let added = board
        .categories()
        .iter()
        .find(|c| c.id == category_id)
        .and_then(|c| c.tasks.last());
    match added {
        Some(task) => success_output(format!(
            "Added task {} to category {category_id} at position {}",
            task.id, task.task_order
        )),
        None => error_output("Task was not added".to_string()),
    }
}

fn report(result: crate::Result<()>, message: String) -> CliOutput {
    match result {
        Ok(()) => success_output(message),
        Err(e) => error_output(e.to_string()),
    }
}

// === Output helpers ===

fn version_output() -> CliOutput {
    success_output(format!("taskboard v{}", crate::VERSION))
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => success_output(json),
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
