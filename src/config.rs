//! Configuration management for taskboard.
//!
//! This module handles the optional `.taskboard/config.yaml` file which
//! stores where a board keeps its snapshot and where its seed lives.

use crate::board::{Board, BoardStore, DEFAULT_STORAGE_KEY};
use crate::error::Result;
use crate::paths;
use crate::seed::FileSeed;
use crate::storage::SqliteStorage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the project root.
pub const CONFIG_FILE_PATH: &str = ".taskboard/config.yaml";

/// Environment variable overriding the storage database path.
pub const STORAGE_ENV: &str = "TASKBOARD_STORAGE";

/// Environment variable overriding the seed document path.
pub const SEED_ENV: &str = "TASKBOARD_SEED";

fn default_seed_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_SEED_PATH)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Board configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    /// Storage database path. None means the per-project default under the
    /// home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Seed document, relative to the project root unless absolute.
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,

    /// Key the collection is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Tracing filter used when `RUST_LOG` is unset (e.g. "taskboard=debug").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            seed_path: default_seed_path(),
            storage_key: default_storage_key(),
            log_filter: None,
        }
    }
}

impl BoardConfig {
    /// Load config from a base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a base directory, falling back to defaults, then
    /// apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn resolve(base_dir: &Path) -> Result<Self> {
        let mut config = Self::load_from(base_dir)?.unwrap_or_default();
        config.apply_env();
        Ok(config)
    }

    /// Apply `TASKBOARD_STORAGE` / `TASKBOARD_SEED` overrides.
    pub fn apply_env(&mut self) {
        if let Some(path) = env_path(STORAGE_ENV) {
            self.storage_path = Some(path);
        }
        if let Some(path) = env_path(SEED_ENV) {
            self.seed_path = path;
        }
    }

    /// Save config to a base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    #[must_use]
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// The storage database path for a board rooted at `base_dir`.
    #[must_use]
    pub fn storage_path_in(&self, base_dir: &Path) -> PathBuf {
        match &self.storage_path {
            Some(path) => base_dir.join(path),
            None => paths::default_storage_path(base_dir),
        }
    }

    /// The seed document path for a board rooted at `base_dir`.
    #[must_use]
    pub fn seed_path_in(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.seed_path)
    }

    /// The seed source for a board rooted at `base_dir`.
    #[must_use]
    pub fn seed_in(&self, base_dir: &Path) -> FileSeed {
        FileSeed::new(self.seed_path_in(base_dir))
    }

    /// Open the `SQLite`-backed board this config describes. The board is
    /// idle; call [`Board::fetch_tasks`] to load it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage database cannot be opened.
    pub fn open_board(&self, base_dir: &Path) -> Result<Board<SqliteStorage>> {
        let storage = SqliteStorage::new(self.storage_path_in(base_dir))?;
        Ok(Board::new(BoardStore::with_key(storage, self.storage_key.clone())))
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}
