//! In-memory operations over one user's task list.
//!
//! The list is ordered most-recent-first: new tasks are prepended and
//! edits keep a task where it is. None of these functions touch storage.

use crate::clock::{format_timestamp, next_timestamp};
use crate::tasks::models::{Task, TaskCounts, TaskDraft, TaskFilter, TaskUpdate};
use chrono::{DateTime, Utc};

/// Build a task from `draft` and prepend it to `tasks`.
///
/// The draft is used as given; normalization and validation happen
/// before this point.
pub fn create_task(
    tasks: &mut Vec<Task>,
    draft: TaskDraft,
    id: String,
    now: DateTime<Utc>,
) -> Task {
    let stamp = format_timestamp(now);
    let task = Task {
        id,
        title: draft.title,
        description: draft.description,
        completed: draft.completed,
        priority: draft.priority,
        due_date: draft.due_date,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    tasks.insert(0, task.clone());
    task
}

/// Merge `update` into the task with `id` and refresh its `updated_at`.
///
/// Returns false, leaving the list unchanged, if no task has that id.
pub fn update_task(tasks: &mut [Task], id: &str, update: &TaskUpdate, now: DateTime<Utc>) -> bool {
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return false;
    };
    update.apply_to(task);
    task.updated_at = next_timestamp(now, &task.updated_at);
    true
}

/// Flip `completed` on the task with `id`.
///
/// Returns false if no task has that id.
pub fn toggle_complete(tasks: &mut [Task], id: &str, now: DateTime<Utc>) -> bool {
    let Some(task) = tasks.iter().find(|t| t.id == id) else {
        return false;
    };
    let update = TaskUpdate { completed: Some(!task.completed), ..Default::default() };
    update_task(tasks, id, &update, now)
}

/// Remove the task with `id`. Returns false if there was none.
pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

/// Tasks passing `filter` whose title or description contains `query`,
/// ignoring case. An empty query matches everything. Order is preserved.
#[must_use]
pub fn filter_and_search(tasks: &[Task], filter: TaskFilter, query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .filter(|task| {
            needle.is_empty()
                || task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Count tasks in total and by completion state.
#[must_use]
pub fn counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskCounts { all: tasks.len(), completed, pending: tasks.len() - completed }
}
