//! # `taskboard`
//!
//! Categories of ordered tasks with drag-and-drop reordering, persisted
//! write-through to local storage and seeded from a static document on first
//! load.

pub mod board;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod seed;
pub mod storage;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{KeyValueStorage, SeedSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
