//! The closed set of CRUD commands and the pure function applying them.
//!
//! [`apply`] never touches storage. It computes the next collection from the
//! current one or rejects the command, leaving the caller's state as it was.

use crate::board::models::{next_category_id, Category, CategoryId, Task, TaskId};

/// A state-transition command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a new, empty category.
    AddCategory {
        /// Display name; must not be blank.
        name: String,
    },
    /// Rename a category.
    UpdateCategory {
        /// The category to rename.
        category_id: CategoryId,
        /// New display name; must not be blank.
        name: String,
    },
    /// Remove a category and all of its tasks.
    DeleteCategory {
        /// The category to remove.
        category_id: CategoryId,
    },
    /// Append a task to a category.
    AddTask {
        /// The owning category.
        category_id: CategoryId,
        /// Task title.
        title: String,
        /// Task description.
        description: String,
        /// Order to store; `None` places the task after every existing one.
        task_order: Option<i64>,
    },
    /// Overwrite a task's title, description and order in place.
    ///
    /// The task stays in `category_id`; this never moves it.
    UpdateTask {
        /// The category holding the task.
        category_id: CategoryId,
        /// The task to update.
        task_id: TaskId,
        /// New title.
        title: String,
        /// New description.
        description: String,
        /// New order, stored verbatim.
        task_order: i64,
    },
    /// Remove a task from a category.
    ///
    /// Every task in the category carrying `task_id` is removed, including
    /// duplicates left behind by a cross-category drag.
    DeleteTask {
        /// The category holding the task.
        category_id: CategoryId,
        /// The task to remove.
        task_id: TaskId,
    },
    /// Replace the whole collection.
    SetCategories(Vec<Category>),
}

impl Command {
    /// Short name used in log lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddCategory { .. } => "add_category",
            Self::UpdateCategory { .. } => "update_category",
            Self::DeleteCategory { .. } => "delete_category",
            Self::AddTask { .. } => "add_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::SetCategories(_) => "set_categories",
        }
    }
}

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A category name was empty or whitespace.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// No category has the given id.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The category exists but holds no task with the given id.
    #[error("task {task_id} not found in category {category_id}")]
    TaskNotFound {
        /// The category searched.
        category_id: CategoryId,
        /// The missing task.
        task_id: TaskId,
    },

    /// The largest id or order in the collection is already `i64::MAX`.
    #[error("no {0} left: the largest one is already i64::MAX")]
    Exhausted(&'static str),
}

/// Apply `command` to `categories`, returning the next collection.
///
/// # Errors
///
/// Returns a [`CommandError`] when validation or a lookup fails. The input is
/// never modified.
pub fn apply(categories: &[Category], command: Command) -> Result<Vec<Category>, CommandError> {
    match command {
        Command::AddCategory { name } => add_category(categories, name),
        Command::UpdateCategory { category_id, name } => {
            update_category(categories, category_id, name)
        }
        Command::DeleteCategory { category_id } => delete_category(categories, category_id),
        Command::AddTask { category_id, title, description, task_order } => {
            add_task(categories, category_id, title, description, task_order)
        }
        Command::UpdateTask { category_id, task_id, title, description, task_order } => {
            update_task(categories, category_id, task_id, title, description, task_order)
        }
        Command::DeleteTask { category_id, task_id } => {
            delete_task(categories, category_id, task_id)
        }
        Command::SetCategories(next) => Ok(next),
    }
}

fn validate_name(name: &str) -> Result<(), CommandError> {
    if name.trim().is_empty() {
        return Err(CommandError::EmptyCategoryName);
    }
    Ok(())
}

fn position(categories: &[Category], category_id: CategoryId) -> Result<usize, CommandError> {
    categories
        .iter()
        .position(|c| c.id == category_id)
        .ok_or(CommandError::CategoryNotFound(category_id))
}

fn add_category(categories: &[Category], name: String) -> Result<Vec<Category>, CommandError> {
    validate_name(&name)?;

    let count = i64::try_from(categories.len()).unwrap_or(i64::MAX);
    let id = next_category_id(categories).ok_or(CommandError::Exhausted("category id"))?;
    let mut next = categories.to_vec();
    next.push(Category {
        id,
        name,
        category_order: count.saturating_add(1),
        tasks: Vec::new(),
    });
    Ok(next)
}

fn update_category(
    categories: &[Category],
    category_id: CategoryId,
    name: String,
) -> Result<Vec<Category>, CommandError> {
    validate_name(&name)?;
    let idx = position(categories, category_id)?;

    let mut next = categories.to_vec();
    next[idx].name = name;
    Ok(next)
}

fn delete_category(
    categories: &[Category],
    category_id: CategoryId,
) -> Result<Vec<Category>, CommandError> {
    position(categories, category_id)?;
    Ok(categories.iter().filter(|c| c.id != category_id).cloned().collect())
}

fn add_task(
    categories: &[Category],
    category_id: CategoryId,
    title: String,
    description: String,
    task_order: Option<i64>,
) -> Result<Vec<Category>, CommandError> {
    let idx = position(categories, category_id)?;

    let current = &categories[idx];
    let id = current.next_task_id().ok_or(CommandError::Exhausted("task id"))?;
    let task_order = match task_order {
        Some(order) => order,
        None => current.next_task_order().ok_or(CommandError::Exhausted("task order"))?,
    };

    let mut next = categories.to_vec();
    let category = &mut next[idx];
    let task = Task { id, title, description, task_order, category_id };
    category.tasks.push(task);
    Ok(next)
}

fn update_task(
    categories: &[Category],
    category_id: CategoryId,
    task_id: TaskId,
    title: String,
    description: String,
    task_order: i64,
) -> Result<Vec<Category>, CommandError> {
    let idx = position(categories, category_id)?;

    let mut next = categories.to_vec();
    let task = next[idx]
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or(CommandError::TaskNotFound { category_id, task_id })?;
    task.title = title;
    task.description = description;
    task.task_order = task_order;
    Ok(next)
}

fn delete_task(
    categories: &[Category],
    category_id: CategoryId,
    task_id: TaskId,
) -> Result<Vec<Category>, CommandError> {
    let idx = position(categories, category_id)?;
    if categories[idx].task(task_id).is_none() {
        return Err(CommandError::TaskNotFound { category_id, task_id });
    }

    let mut next = categories.to_vec();
    let category = &mut next[idx];
    category.tasks.retain(|t| t.id != task_id);
    category.renumber_tasks();
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::models::check_invariants;
    use crate::board::models::fixtures::{category, task};
    use proptest::prelude::*;

    fn add_category_cmd(name: &str) -> Command {
        Command::AddCategory { name: name.to_string() }
    }

    fn add_task_cmd(category_id: CategoryId, title: &str) -> Command {
        Command::AddTask {
            category_id,
            title: title.to_string(),
            description: String::new(),
            task_order: None,
        }
    }

    #[test]
    fn test_add_category_to_empty_collection() {
        let next = apply(&[], add_category_cmd("Work")).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, 1);
        assert_eq!(next[0].category_order, 1);
        assert_eq!(next[0].name, "Work");
        assert!(next[0].tasks.is_empty());
    }

    #[test]
    fn test_add_category_uses_max_id_and_count() {
        let cats = vec![category(5, "a", &[]), category(2, "b", &[])];
        let next = apply(&cats, add_category_cmd("c")).unwrap();
        assert_eq!(next[2].id, 6);
        assert_eq!(next[2].category_order, 3);
    }

    #[test]
    fn test_add_category_keeps_name_verbatim() {
        let next = apply(&[], add_category_cmd("  Home ")).unwrap();
        assert_eq!(next[0].name, "  Home ");
    }

    #[test]
    fn test_add_category_rejects_blank_name() {
        assert_eq!(apply(&[], add_category_cmd("   ")), Err(CommandError::EmptyCategoryName));
        assert_eq!(apply(&[], add_category_cmd("")), Err(CommandError::EmptyCategoryName));
    }

    #[test]
    fn test_update_category_renames() {
        let cats = vec![category(1, "Work", &[1])];
        let next = apply(&cats, Command::UpdateCategory { category_id: 1, name: "Job".into() })
            .unwrap();
        assert_eq!(next[0].name, "Job");
        assert_eq!(next[0].tasks, cats[0].tasks);
    }

    #[test]
    fn test_update_category_missing() {
        let cats = vec![category(1, "Work", &[])];
        let err =
            apply(&cats, Command::UpdateCategory { category_id: 2, name: "x".into() }).unwrap_err();
        assert_eq!(err, CommandError::CategoryNotFound(2));
    }

    #[test]
    fn test_update_category_rejects_blank_name() {
        let cats = vec![category(1, "Work", &[])];
        let err =
            apply(&cats, Command::UpdateCategory { category_id: 1, name: " ".into() }).unwrap_err();
        assert_eq!(err, CommandError::EmptyCategoryName);
    }

    #[test]
    fn test_delete_category_keeps_others_unchanged() {
        let cats = vec![category(1, "a", &[1]), category(2, "b", &[1, 2])];
        let next = apply(&cats, Command::DeleteCategory { category_id: 1 }).unwrap();
        assert_eq!(next, vec![cats[1].clone()]);
    }

    #[test]
    fn test_delete_category_does_not_renumber_category_order() {
        let cats = vec![category(1, "a", &[]), category(2, "b", &[]), category(3, "c", &[])];
        let next = apply(&cats, Command::DeleteCategory { category_id: 2 }).unwrap();
        let orders: Vec<i64> = next.iter().map(|c| c.category_order).collect();
        assert_eq!(orders, vec![1, 3]);
    }

    #[test]
    fn test_delete_category_missing() {
        let err = apply(&[], Command::DeleteCategory { category_id: 1 }).unwrap_err();
        assert_eq!(err, CommandError::CategoryNotFound(1));
    }

    #[test]
    fn test_add_task_gets_max_id_plus_one() {
        let cats = vec![category(1, "Work", &[1, 3, 2])];
        let next = apply(&cats, add_task_cmd(1, "X")).unwrap();
        let added = next[0].tasks.last().unwrap();
        assert_eq!(added.id, 4);
        assert_eq!(added.task_order, 4);
        assert_eq!(added.category_id, 1);
        assert_eq!(added.title, "X");
    }

    #[test]
    fn test_add_task_explicit_order_stored_verbatim() {
        let cats = vec![category(1, "Work", &[1])];
        let cmd = Command::AddTask {
            category_id: 1,
            title: "X".into(),
            description: "d".into(),
            task_order: Some(7),
        };
        let next = apply(&cats, cmd).unwrap();
        assert_eq!(next[0].tasks[1].task_order, 7);
        assert_eq!(next[0].tasks[1].description, "d");
    }

    #[test]
    fn test_add_task_allows_empty_title() {
        let cats = vec![category(1, "Work", &[])];
        let next = apply(&cats, add_task_cmd(1, "")).unwrap();
        assert_eq!(next[0].tasks[0].title, "");
    }

    #[test]
    fn test_add_task_ids_are_per_category() {
        let cats = vec![category(1, "a", &[1, 2]), category(2, "b", &[1, 2])];
        let next = apply(&cats, add_task_cmd(2, "x")).unwrap();
        assert_eq!(next[1].tasks[2].id, 3);
        assert_eq!(next[0], cats[0]);
    }

    #[test]
    fn test_add_task_missing_category() {
        let err = apply(&[], add_task_cmd(3, "x")).unwrap_err();
        assert_eq!(err, CommandError::CategoryNotFound(3));
    }

    #[test]
    fn test_update_task_in_place() {
        let cats = vec![category(1, "Work", &[1, 2])];
        let cmd = Command::UpdateTask {
            category_id: 1,
            task_id: 2,
            title: "New".into(),
            description: "Desc".into(),
            task_order: 2,
        };
        let next = apply(&cats, cmd).unwrap();
        let task = next[0].task(2).unwrap();
        assert_eq!(task.title, "New");
        assert_eq!(task.description, "Desc");
        assert_eq!(task.category_id, 1);
    }

    #[test]
    fn test_update_task_missing_task() {
        let cats = vec![category(1, "Work", &[1])];
        let cmd = Command::UpdateTask {
            category_id: 1,
            task_id: 9,
            title: String::new(),
            description: String::new(),
            task_order: 1,
        };
        assert_eq!(
            apply(&cats, cmd).unwrap_err(),
            CommandError::TaskNotFound { category_id: 1, task_id: 9 }
        );
    }

    #[test]
    fn test_update_task_looks_only_in_named_category() {
        let cats = vec![category(1, "a", &[1]), category(2, "b", &[])];
        let cmd = Command::UpdateTask {
            category_id: 2,
            task_id: 1,
            title: "moved?".into(),
            description: String::new(),
            task_order: 1,
        };
        assert!(matches!(apply(&cats, cmd), Err(CommandError::TaskNotFound { .. })));
    }

    #[test]
    fn test_delete_task_renumbers_remaining() {
        let cats = vec![category(1, "Work", &[1, 2, 3])];
        let next = apply(&cats, Command::DeleteTask { category_id: 1, task_id: 2 }).unwrap();
        let ids: Vec<TaskId> = next[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(check_invariants(&next).is_empty());
    }

    #[test]
    fn test_delete_task_removes_duplicate_ids() {
        let mut cats = vec![category(1, "Work", &[1, 2])];
        cats[0].tasks.push(task(1, 1, 3));
        let next = apply(&cats, Command::DeleteTask { category_id: 1, task_id: 1 }).unwrap();
        let ids: Vec<(TaskId, i64)> = next[0].tasks.iter().map(|t| (t.id, t.task_order)).collect();
        assert_eq!(ids, vec![(2, 1)]);
    }

    #[test]
    fn test_add_category_after_max_id_rejected() {
        let cats = vec![category(i64::MAX, "Last", &[])];
        assert_eq!(
            apply(&cats, add_category_cmd("Next")).unwrap_err(),
            CommandError::Exhausted("category id")
        );
    }

    #[test]
    fn test_add_task_after_max_id_rejected() {
        let cats = vec![category(1, "Work", &[i64::MAX])];
        assert_eq!(
            apply(&cats, add_task_cmd(1, "X")).unwrap_err(),
            CommandError::Exhausted("task id")
        );
    }

    #[test]
    fn test_add_task_after_max_order() {
        let mut cats = vec![category(1, "Work", &[1])];
        cats[0].tasks[0].task_order = i64::MAX;
        assert_eq!(
            apply(&cats, add_task_cmd(1, "X")).unwrap_err(),
            CommandError::Exhausted("task order")
        );

        let explicit = Command::AddTask {
            category_id: 1,
            title: "Y".to_string(),
            description: String::new(),
            task_order: Some(2),
        };
        let next = apply(&cats, explicit).unwrap();
        assert_eq!(next[0].tasks[1].id, 2);
    }

    #[test]
    fn test_delete_task_missing() {
        let cats = vec![category(1, "Work", &[1])];
        assert_eq!(
            apply(&cats, Command::DeleteTask { category_id: 1, task_id: 2 }).unwrap_err(),
            CommandError::TaskNotFound { category_id: 1, task_id: 2 }
        );
        assert_eq!(
            apply(&cats, Command::DeleteTask { category_id: 4, task_id: 1 }).unwrap_err(),
            CommandError::CategoryNotFound(4)
        );
    }

    #[test]
    fn test_set_categories_replaces_everything() {
        let cats = vec![category(1, "a", &[1])];
        let replacement = vec![category(9, "z", &[])];
        assert_eq!(apply(&cats, Command::SetCategories(replacement.clone())).unwrap(), replacement);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(add_category_cmd("x").name(), "add_category");
        assert_eq!(Command::SetCategories(Vec::new()).name(), "set_categories");
    }

    proptest! {
        #[test]
        fn prop_category_ids_strictly_increase(names in prop::collection::vec("[a-z]{1,8}", 1..20)) {
            let mut cats = Vec::new();
            for name in names {
                cats = apply(&cats, Command::AddCategory { name }).unwrap();
            }
            for pair in cats.windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }

        #[test]
        fn prop_task_ids_unique_within_category(adds in 1usize..30, deletes in prop::collection::vec(any::<prop::sample::Index>(), 0..10)) {
            let mut cats = vec![category(1, "Work", &[])];
            for i in 0..adds {
                cats = apply(&cats, add_task_cmd(1, &format!("t{i}"))).unwrap();
            }
            for idx in deletes {
                if cats[0].tasks.is_empty() {
                    break;
                }
                let task_id = cats[0].tasks[idx.index(cats[0].tasks.len())].id;
                cats = apply(&cats, Command::DeleteTask { category_id: 1, task_id }).unwrap();
                cats = apply(&cats, add_task_cmd(1, "again")).unwrap();
            }
            prop_assert!(check_invariants(&cats).is_empty());
        }
    }
}
