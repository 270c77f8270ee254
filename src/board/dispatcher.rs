//! The board: command dispatch, load status, and change notification.
//!
//! A [`Board`] is an explicitly owned state container. The application
//! creates one, hands it to whatever issues commands, and reads
//! [`Board::snapshot`] after each command. Commands run one at a time through
//! `&mut self`, so a command's read of the current state and its write of the
//! next state never interleave with another command.

use crate::board::commands::{self, Command};
use crate::board::models::{Category, CategoryId, LoadStatus, TaskId};
use crate::board::reorder::{self, DragResult};
use crate::board::store::BoardStore;
use crate::error::{Error, Result};
use crate::traits::{KeyValueStorage, SeedSource};
use serde::Serialize;

/// Read-only view of the board, as consumed by views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot<'a> {
    /// The category collection in display order.
    pub categories: &'a [Category],
    /// Status of the most recent fetch.
    pub status: LoadStatus,
    /// Error message from the most recent failed fetch.
    pub error: Option<&'a str>,
}

type Listener = Box<dyn FnMut(&Snapshot<'_>)>;

/// The task board.
pub struct Board<S> {
    store: BoardStore<S>,
    status: LoadStatus,
    error: Option<String>,
    listeners: Vec<Listener>,
}

impl<S> std::fmt::Debug for Board<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("categories", &self.store.categories().len())
            .field("status", &self.status)
            .field("error", &self.error)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S> Board<S> {
    /// Create an idle, empty board over `store`.
    pub fn new(store: BoardStore<S>) -> Self {
        Self { store, status: LoadStatus::Idle, error: None, listeners: Vec::new() }
    }

    /// Read the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            categories: self.store.categories(),
            status: self.status,
            error: self.error.as_deref(),
        }
    }

    /// The current collection.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.store.categories()
    }

    /// Status of the most recent fetch.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Error message from the most recent failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &BoardStore<S> {
        &self.store
    }

    /// Register a listener called with the new snapshot after every status
    /// change and every successful command.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        let snapshot = self.snapshot();
        for listener in &mut listeners {
            listener(&snapshot);
        }
        self.listeners = listeners;
    }
}

impl<S: KeyValueStorage> Board<S> {
    /// Load the collection from storage, falling back to `seed`.
    ///
    /// Status moves to `loading`, then to `succeeded` (collection replaced)
    /// or `failed` (error message set, collection unchanged).
    ///
    /// # Errors
    ///
    /// Returns the [`Error::Load`] that moved the board to `failed`.
    pub fn fetch_tasks(&mut self, seed: &dyn SeedSource) -> Result<()> {
        self.status = LoadStatus::Loading;
        self.error = None;
        self.notify();

        match self.store.load(seed) {
            Ok(categories) => {
                self.store.set(categories);
                self.status = LoadStatus::Succeeded;
                self.notify();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetching tasks failed");
                self.status = LoadStatus::Failed;
                self.error = Some(e.to_string());
                self.notify();
                Err(e)
            }
        }
    }

    /// Apply a command, persisting the result on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] if the command is rejected; state and
    /// storage are left untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        let name = command.name();
        tracing::debug!(command = name, "dispatching");

        match commands::apply(self.store.categories(), command) {
            Ok(next) => {
                self.store.replace_all(next);
                self.notify();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(command = name, error = %e, "command rejected");
                Err(e.into())
            }
        }
    }

    /// Append a category named `name`.
    ///
    /// # Errors
    ///
    /// Fails if the name is blank.
    pub fn add_category(&mut self, name: impl Into<String>) -> Result<()> {
        self.dispatch(Command::AddCategory { name: name.into() })
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Fails if the name is blank or the category does not exist.
    pub fn update_category(
        &mut self,
        category_id: CategoryId,
        name: impl Into<String>,
    ) -> Result<()> {
        self.dispatch(Command::UpdateCategory { category_id, name: name.into() })
    }

    /// Remove a category with all of its tasks.
    ///
    /// # Errors
    ///
    /// Fails if the category does not exist.
    pub fn delete_category(&mut self, category_id: CategoryId) -> Result<()> {
        self.dispatch(Command::DeleteCategory { category_id })
    }

    /// Append a task to a category; `task_order` of `None` places it last.
    ///
    /// # Errors
    ///
    /// Fails if the category does not exist.
    pub fn add_task(
        &mut self,
        category_id: CategoryId,
        title: impl Into<String>,
        description: impl Into<String>,
        task_order: Option<i64>,
    ) -> Result<()> {
        self.dispatch(Command::AddTask {
            category_id,
            title: title.into(),
            description: description.into(),
            task_order,
        })
    }

    /// Overwrite a task's title, description and order.
    ///
    /// # Errors
    ///
    /// Fails if the category or the task within it does not exist.
    pub fn update_task(
        &mut self,
        task_id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        task_order: i64,
        category_id: CategoryId,
    ) -> Result<()> {
        self.dispatch(Command::UpdateTask {
            category_id,
            task_id,
            title: title.into(),
            description: description.into(),
            task_order,
        })
    }

    /// Remove a task from a category.
    ///
    /// # Errors
    ///
    /// Fails if the category or the task within it does not exist.
    pub fn delete_task(&mut self, task_id: TaskId, category_id: CategoryId) -> Result<()> {
        self.dispatch(Command::DeleteTask { category_id, task_id })
    }

    /// Replace the whole collection and persist it.
    ///
    /// # Errors
    ///
    /// Never fails; returns `Result` to match the other commands.
    pub fn set_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        self.dispatch(Command::SetCategories(categories))
    }

    /// Apply a completed drag gesture.
    ///
    /// Returns `Ok(false)` without touching state when the drag has no
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reorder`] if a category is missing or an index is out
    /// of range; state and storage are left untouched.
    pub fn apply_drag_result(&mut self, drag: DragResult) -> Result<bool> {
        let Some(destination) = drag.destination else {
            tracing::debug!("drag ended outside any list");
            return Ok(false);
        };

        let next = reorder::apply_drag(self.store.categories(), &drag.source, &destination)
            .map_err(|e| {
                tracing::warn!(error = %e, "drag rejected");
                Error::from(e)
            })?;
        self.set_categories(next)?;
        Ok(true)
    }

    /// Drop the durable snapshot and reload from `seed`.
    ///
    /// # Errors
    ///
    /// Fails if storage cannot be cleared or the reload fails.
    pub fn reset(&mut self, seed: &dyn SeedSource) -> Result<()> {
        self.store.clear()?;
        self.fetch_tasks(seed)
    }
}
