//! Task management.
//!
//! This module provides:
//! - The [`Task`] record and its draft/update/filter types
//! - Pure in-memory list operations (create, update, toggle, delete,
//!   filter and search, counts)
//! - [`TaskRepository`], which persists a whole list per user
//! - ID generators
//!
//! # Example
//!
//! ```
//! use task_keeper::session::KeySpace;
//! use task_keeper::storage::MemoryStore;
//! use task_keeper::tasks::{self, TaskDraft, TaskFilter, TaskRepository};
//!
//! let repo = TaskRepository::new(MemoryStore::new(), KeySpace::default());
//! let mut list = repo.load_tasks("alice");
//!
//! tasks::create_task(&mut list, TaskDraft::titled("Buy milk"), "1".into(), chrono::Utc::now());
//! repo.save_tasks(&list, "alice");
//!
//! let pending = tasks::filter_and_search(&repo.load_tasks("Alice"), TaskFilter::Pending, "milk");
//! assert_eq!(pending.len(), 1);
//! ```

pub mod id;
pub mod list;
pub mod models;
pub mod store;

pub use id::{MillisIdGenerator, SequentialIdGenerator};
pub use list::{counts, create_task, delete_task, filter_and_search, toggle_complete, update_task};
pub use models::{
    InvalidFilter, InvalidPriority, Priority, Task, TaskCounts, TaskDraft, TaskFilter, TaskUpdate,
};
pub use store::TaskRepository;
