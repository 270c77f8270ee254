//! Model types for categories, tasks, and load status.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category identifier, unique across the collection.
pub type CategoryId = i64;

/// Task identifier, unique only within its owning category.
pub type TaskId = i64;

/// A task within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within the owning category.
    pub id: TaskId,
    /// Short title. May be empty.
    pub title: String,
    /// Longer description. May be empty.
    #[serde(default)]
    pub description: String,
    /// 1-based position within the owning category.
    pub task_order: i64,
    /// Id of the owning category.
    pub category_id: CategoryId,
}

/// A named group owning an ordered sequence of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Position hint assigned at creation. Display order follows the
    /// position in the collection, not this field.
    pub category_order: i64,
    /// Tasks in display order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Category {
    /// Id the next task added to this category receives, or `None` when the
    /// largest id is already `i64::MAX`.
    #[must_use]
    pub fn next_task_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0).checked_add(1)
    }

    /// Order value that places a new task after every existing one, or
    /// `None` when the largest order is already `i64::MAX`.
    #[must_use]
    pub fn next_task_order(&self) -> Option<i64> {
        self.tasks.iter().map(|t| t.task_order).max().unwrap_or(0).checked_add(1)
    }

    /// Find a task by id.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Rewrite `task_order` to `1..=N` following the current sequence.
    pub fn renumber_tasks(&mut self) {
        renumber(&mut self.tasks);
    }
}

/// Rewrite `task_order` to `1..=N` following sequence position.
pub(crate) fn renumber(tasks: &mut [Task]) {
    for (order, task) in (1..).zip(tasks.iter_mut()) {
        task.task_order = order;
    }
}

/// Id the next category added to `categories` receives, or `None` when the
/// largest id is already `i64::MAX`.
#[must_use]
pub fn next_category_id(categories: &[Category]) -> Option<CategoryId> {
    categories.iter().map(|c| c.id).max().unwrap_or(0).checked_add(1)
}

/// Status of the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// No fetch has been attempted.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch produced a collection.
    Succeeded,
    /// The last fetch failed; see the board's error message.
    Failed,
}

impl LoadStatus {
    /// Get the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structural problem found in a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two categories share an id.
    DuplicateCategoryId(CategoryId),
    /// Two tasks in one category share an id.
    DuplicateTaskId {
        /// The owning category.
        category_id: CategoryId,
        /// The repeated task id.
        task_id: TaskId,
    },
    /// A task's `category_id` does not name the category holding it.
    WrongCategory {
        /// The category holding the task.
        category_id: CategoryId,
        /// The task.
        task_id: TaskId,
        /// The back-reference stored on the task.
        found: CategoryId,
    },
    /// A task's `task_order` differs from its 1-based sequence position.
    OutOfOrder {
        /// The owning category.
        category_id: CategoryId,
        /// The task.
        task_id: TaskId,
        /// The position the task should report.
        expected: i64,
        /// The `task_order` it reports.
        found: i64,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCategoryId(id) => write!(f, "duplicate category id {id}"),
            Self::DuplicateTaskId { category_id, task_id } => {
                write!(f, "duplicate task id {task_id} in category {category_id}")
            }
            Self::WrongCategory { category_id, task_id, found } => write!(
                f,
                "task {task_id} in category {category_id} claims category {found}"
            ),
            Self::OutOfOrder { category_id, task_id, expected, found } => write!(
                f,
                "task {task_id} in category {category_id} has task_order {found}, expected {expected}"
            ),
        }
    }
}

/// Check the structural invariants of a collection.
///
/// Returns every violation found; an empty vector means the collection is
/// consistent. Nothing is repaired.
#[must_use]
pub fn check_invariants(categories: &[Category]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut category_ids = HashSet::new();

    for category in categories {
        if !category_ids.insert(category.id) {
            violations.push(InvariantViolation::DuplicateCategoryId(category.id));
        }

        let mut task_ids = HashSet::new();
        for (expected, task) in (1..).zip(&category.tasks) {
            if !task_ids.insert(task.id) {
                violations.push(InvariantViolation::DuplicateTaskId {
                    category_id: category.id,
                    task_id: task.id,
                });
            }
            if task.category_id != category.id {
                violations.push(InvariantViolation::WrongCategory {
                    category_id: category.id,
                    task_id: task.id,
                    found: task.category_id,
                });
            }
            if task.task_order != expected {
                violations.push(InvariantViolation::OutOfOrder {
                    category_id: category.id,
                    task_id: task.id,
                    expected,
                    found: task.task_order,
                });
            }
        }
    }

    violations
}
