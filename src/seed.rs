//! Seed sources for first-time loads.

use crate::error::{Error, Result};
use crate::traits::SeedSource;
use std::path::{Path, PathBuf};

/// Message reported when a seed cannot be fetched.
pub const FETCH_FAILED: &str = "Failed to fetch tasks";

/// A seed document read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    /// Create a seed source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Get the seed file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedSource for FileSeed {
    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Load(format!("{FETCH_FAILED}: {}: {e}", self.path.display())))
    }

    fn describe(&self) -> String {
        format!("seed file {}", self.path.display())
    }
}

/// A seed document held in memory.
#[derive(Debug, Clone)]
pub struct StaticSeed(pub String);

impl SeedSource for StaticSeed {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static seed".to_string()
    }
}
