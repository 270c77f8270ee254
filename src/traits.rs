//! Core traits for testability and abstraction.

use crate::error::Result;

/// Trait for durable key/value storage.
///
/// This is the local-storage contract the board mirrors its state into.
/// The production implementation uses `SQLite`, while tests use an in-memory map.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Trait for the static seed document used when storage holds no snapshot.
pub trait SeedSource {
    /// Fetch the raw seed document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Load`] if the source is unreachable.
    fn fetch(&self) -> Result<String>;

    /// Human-readable description of the source, for log lines.
    fn describe(&self) -> String;
}
