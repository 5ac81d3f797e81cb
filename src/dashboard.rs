//! The per-user task dashboard.
//!
//! A [`Dashboard`] holds the active user's task list in memory together
//! with the transient view state (filter, search query, open form). Every
//! successful mutation writes the whole list back to storage, but only once
//! the initial load for that user has happened, so an empty list that has
//! not been loaded yet can never overwrite stored tasks.

use crate::error::ValidationError;
use crate::tasks::{self, Task, TaskCounts, TaskDraft, TaskFilter, TaskRepository, TaskUpdate};
use crate::traits::{Clock, IdGenerator, KeyValueStore};
use crate::validation::{validate_draft, validate_update};
use std::rc::Rc;

/// Which task form, if any, is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    /// No form is open.
    #[default]
    Closed,
    /// The new-task form is open.
    Creating,
    /// The edit form is open for the task with this id.
    Editing(String),
}

/// Transient, never-persisted view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Completion filter.
    pub filter: TaskFilter,
    /// Search text matched against title and description.
    pub query: String,
    /// Open form.
    pub form: FormState,
}

/// Task list controller for one active user.
pub struct Dashboard<S> {
    repo: TaskRepository<S>,
    clock: Rc<dyn Clock>,
    ids: Rc<dyn IdGenerator>,
    username: String,
    tasks: Vec<Task>,
    loaded: bool,
    view: ViewState,
}

impl<S> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("username", &self.username)
            .field("tasks", &self.tasks.len())
            .field("loaded", &self.loaded)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Create a dashboard for `username` without loading it.
    ///
    /// Until [`Dashboard::load`] runs, mutations only change memory.
    pub fn new(
        repo: TaskRepository<S>,
        clock: Rc<dyn Clock>,
        ids: Rc<dyn IdGenerator>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            clock,
            ids,
            username: username.into(),
            tasks: Vec::new(),
            loaded: false,
            view: ViewState::default(),
        }
    }

    /// Create a dashboard for `username` and load its tasks.
    pub fn open(
        repo: TaskRepository<S>,
        clock: Rc<dyn Clock>,
        ids: Rc<dyn IdGenerator>,
        username: impl Into<String>,
    ) -> Self {
        let mut dashboard = Self::new(repo, clock, ids, username);
        dashboard.load();
        dashboard
    }

    /// Load the active user's tasks fresh, enable saving, reset the view.
    pub fn load(&mut self) {
        self.tasks = self.repo.load_tasks(&self.username);
        self.loaded = true;
        self.view = ViewState::default();
    }

    /// Make another user active.
    ///
    /// Nothing is written for the previous user; its last mutation was
    /// already saved.
    pub fn switch_user(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.tasks.clear();
        self.loaded = false;
        tracing::info!(username = %self.username, "switching dashboard user");
        self.load();
    }

    /// The active username, as entered.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The full task list, most recent first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether the initial load has happened.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current view state.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Look up a task by id.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The task currently being edited, if any.
    #[must_use]
    pub fn editing_task(&self) -> Option<&Task> {
        match &self.view.form {
            FormState::Editing(id) => self.task(id),
            _ => None,
        }
    }

    /// Tasks passing the current filter and search query.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        tasks::filter_and_search(&self.tasks, self.view.filter, &self.view.query)
    }

    /// Task totals over the full list.
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        tasks::counts(&self.tasks)
    }

    /// Whether `task` is overdue right now.
    #[must_use]
    pub fn is_overdue(&self, task: &Task) -> bool {
        task.is_overdue(self.clock.now())
    }

    /// Set the completion filter.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.view.filter = filter;
    }

    /// Set the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.view.query = query.into();
    }

    /// Open the new-task form.
    pub fn begin_create(&mut self) {
        self.view.form = FormState::Creating;
    }

    /// Open the edit form for a task. Returns false for an unknown id.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        if self.task(id).is_none() {
            return false;
        }
        self.view.form = FormState::Editing(id.to_string());
        true
    }

    /// Close any open form without saving.
    pub fn cancel_form(&mut self) {
        self.view.form = FormState::Closed;
    }

    /// Validate `draft` and add it as a new task at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving everything unchanged, if the
    /// title is blank.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, ValidationError> {
        let draft = validate_draft(draft)?;
        let id = self.fresh_id();
        let task = tasks::create_task(&mut self.tasks, draft, id, self.clock.now());
        self.view.form = FormState::Closed;
        self.persist();
        Ok(task)
    }

    /// Validate `update` and merge it into the task with `id`.
    ///
    /// Returns `Ok(false)`, writing nothing, if no task has that id or the
    /// update sets no fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the update sets a blank title.
    pub fn update(&mut self, id: &str, update: TaskUpdate) -> Result<bool, ValidationError> {
        let update = validate_update(update)?;
        if update.is_empty() {
            return Ok(false);
        }
        let changed = tasks::update_task(&mut self.tasks, id, &update, self.clock.now());
        if changed {
            if self.view.form == FormState::Editing(id.to_string()) {
                self.view.form = FormState::Closed;
            }
            self.persist();
        }
        Ok(changed)
    }

    /// Flip completion of the task with `id`. Returns false if unknown.
    pub fn toggle(&mut self, id: &str) -> bool {
        let changed = tasks::toggle_complete(&mut self.tasks, id, self.clock.now());
        if changed {
            self.persist();
        }
        changed
    }

    /// Delete the task with `id`. Returns false if unknown.
    pub fn delete(&mut self, id: &str) -> bool {
        let changed = tasks::delete_task(&mut self.tasks, id);
        if changed {
            if self.view.form == FormState::Editing(id.to_string()) {
                self.view.form = FormState::Closed;
            }
            self.persist();
        }
        changed
    }

    /// Next generated id not already used in the list.
    ///
    /// A generator restarted in a new process can repeat an id issued
    /// earlier, e.g. after the wall clock stepped back.
    fn fresh_id(&self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.task(&id).is_none() {
                return id;
            }
            tracing::debug!(id = %id, "generated id already in use, drawing another");
        }
    }

    fn persist(&self) {
        if self.loaded {
            self.repo.save_tasks(&self.tasks, &self.username);
        } else {
            tracing::debug!(username = %self.username, "skipping save before initial load");
        }
    }
}
