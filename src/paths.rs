//! Path utilities for determining data storage locations.
//!
//! Board snapshots live in `~/.taskboard/` with project-specific
//! subdirectories based on a hash of the project path, so two checkouts of
//! the same board never share a snapshot.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// The directory name used both under the home directory and inside a project.
pub const DATA_DIR_NAME: &str = ".taskboard";

/// The storage database filename.
pub const DATABASE_FILENAME: &str = "board.sqlite3";

/// Default seed document, relative to the project directory.
pub const DEFAULT_SEED_PATH: &str = "data/tasks.json";

/// Get the base data directory for taskboard.
///
/// Returns `~/.taskboard/` or `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the project-specific data directory.
///
/// Returns `~/.taskboard/projects/<name>-<hash>/`, or `None` if the home
/// directory cannot be determined.
#[must_use]
pub fn project_data_dir(project_dir: &Path) -> Option<PathBuf> {
    let base = data_dir()?;
    Some(base.join("projects").join(create_project_dir_name(project_dir)))
}

/// Get the default storage database path for a project.
///
/// Falls back to `<project>/.taskboard/board.sqlite3` when there is no home
/// directory.
#[must_use]
pub fn default_storage_path(project_dir: &Path) -> PathBuf {
    project_data_dir(project_dir).map_or_else(
        || project_dir.join(DATA_DIR_NAME).join(DATABASE_FILENAME),
        |dir| dir.join(DATABASE_FILENAME),
    )
}

/// Create a directory name for a project.
///
/// Format: `<project-name>-<hash>` e.g., `my-board-00a1b2c3d4e5f607`
fn create_project_dir_name(project_dir: &Path) -> String {
    let path_to_hash = project_dir.canonicalize().unwrap_or_else(|_| project_dir.to_path_buf());

    let prefix = path_to_hash.file_name().and_then(|n| n.to_str()).unwrap_or("project");
    let prefix: String =
        prefix.chars().map(|c| if c.is_alphanumeric() { c } else { '-' }).collect();
    let prefix = prefix.trim_matches('-');

    format!("{prefix}-{:016x}", hash_path(&path_to_hash))
}

/// Compute a stable hash of a path.
fn hash_path(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}
