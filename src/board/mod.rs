//! Category and task board.
//!
//! This module provides the board's state and the commands that change it:
//! - Categories owning ordered task lists, with per-category task ids
//! - A closed set of CRUD commands applied as pure functions
//! - Drag-and-drop reordering within and across categories
//! - Write-through persistence of the whole collection on every change
//!
//! # Example
//!
//! ```
//! use taskboard::board::{Board, BoardStore, DragLocation, DragResult};
//! use taskboard::seed::StaticSeed;
//! use taskboard::storage::MemoryStorage;
//!
//! let mut board = Board::new(BoardStore::new(MemoryStorage::new()));
//! board.fetch_tasks(&StaticSeed("[]".to_string())).unwrap();
//!
//! board.add_category("Work").unwrap();
//! board.add_task(1, "Write report", "", None).unwrap();
//! board.add_task(1, "Email team", "", None).unwrap();
//!
//! // Drag the second task to the top.
//! board
//!     .apply_drag_result(DragResult {
//!         source: DragLocation { category_id: 1, index: 1 },
//!         destination: Some(DragLocation { category_id: 1, index: 0 }),
//!     })
//!     .unwrap();
//!
//! assert_eq!(board.categories()[0].tasks[0].title, "Email team");
//! ```

pub mod commands;
pub mod dispatcher;
pub mod models;
pub mod reorder;
pub mod store;

pub use commands::{apply, Command, CommandError};
pub use dispatcher::{Board, Snapshot};
pub use models::{
    check_invariants, next_category_id, Category, CategoryId, InvariantViolation, LoadStatus,
    Task, TaskId,
};
pub use reorder::{apply_drag, DragLocation, DragResult, ReorderError};
pub use store::{BoardStore, DEFAULT_STORAGE_KEY};
