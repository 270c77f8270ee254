//! Applying a completed drag gesture to the collection.
//!
//! A drag moves exactly one task from a source position to a destination
//! position, within one category or across two. Both affected task lists are
//! renumbered to `1..=N` afterwards, so a valid drag always leaves contiguous
//! `task_order` values.

use crate::board::models::{renumber, Category, CategoryId};
use serde::{Deserialize, Serialize};

/// A position in a category's task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    /// The category the position belongs to.
    pub category_id: CategoryId,
    /// 0-based index into the category's task list.
    pub index: usize,
}

/// The outcome of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    /// Where the dragged task started.
    pub source: DragLocation,
    /// Where it was dropped; `None` when dropped outside any list.
    pub destination: Option<DragLocation>,
}

/// Why a drag could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The source or destination category does not exist.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The source index does not name a task.
    #[error("source index {index} out of range for category {category_id} with {len} tasks")]
    SourceIndexOutOfRange {
        /// The source category.
        category_id: CategoryId,
        /// The requested index.
        index: usize,
        /// Tasks in the category before removal.
        len: usize,
    },

    /// The destination index is past the end of the list.
    #[error(
        "destination index {index} out of range for category {category_id} with {len} tasks"
    )]
    DestinationIndexOutOfRange {
        /// The destination category.
        category_id: CategoryId,
        /// The requested index.
        index: usize,
        /// Tasks in the category after the source removal.
        len: usize,
    },
}

fn position(categories: &[Category], category_id: CategoryId) -> Result<usize, ReorderError> {
    categories
        .iter()
        .position(|c| c.id == category_id)
        .ok_or(ReorderError::CategoryNotFound(category_id))
}

/// Move the task at `source` to `destination`, returning the new collection.
///
/// # Errors
///
/// Returns a [`ReorderError`] if either category is missing or an index is
/// out of range. The input is never modified.
pub fn apply_drag(
    categories: &[Category],
    source: &DragLocation,
    destination: &DragLocation,
) -> Result<Vec<Category>, ReorderError> {
    let src = position(categories, source.category_id)?;
    let dst = position(categories, destination.category_id)?;

    let src_len = categories[src].tasks.len();
    if source.index >= src_len {
        return Err(ReorderError::SourceIndexOutOfRange {
            category_id: source.category_id,
            index: source.index,
            len: src_len,
        });
    }
    // Same list: the removal shrinks the list the insert lands in.
    let dst_len = if src == dst { src_len - 1 } else { categories[dst].tasks.len() };
    if destination.index > dst_len {
        return Err(ReorderError::DestinationIndexOutOfRange {
            category_id: destination.category_id,
            index: destination.index,
            len: dst_len,
        });
    }

    let mut next = categories.to_vec();
    let mut moved = next[src].tasks.remove(source.index);
    if src != dst {
        moved.category_id = next[dst].id;
    }
    next[dst].tasks.insert(destination.index, moved);

    renumber(&mut next[src].tasks);
    if src != dst {
        renumber(&mut next[dst].tasks);
    }
    Ok(next)
}
