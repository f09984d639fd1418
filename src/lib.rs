//! Tasker - Priority-driven local task tracker
//!
//! A single-user task tracker backed by one JSON file: tasks carry a
//! priority, a status, and an optional due date, and the crate provides the
//! persistent store plus read-only query and statistics layers over it.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`task`] - The task record and its persisted encodings
//! - [`store`] - File-backed store owning the tasks and the id sequence
//! - [`query`] - Pure filter/sort/due-state views over store snapshots
//! - [`stats`] - Aggregate counts and completion rate
//! - [`error`] - Custom error types and handling
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Local;
//! use tasker::{query, stats, Priority, Status, TaskStore};
//!
//! let mut store = TaskStore::open("tasks.json");
//! let now = Local::now().naive_local();
//!
//! store.create("Write report", "", Priority::High, None, now)?;
//!
//! for task in query::active_view(store.tasks()) {
//!     println!("[{}] {}", task.id, task.title);
//! }
//!
//! let summary = stats::compute(store.tasks(), now.date());
//! println!("{:.1}% done", summary.completion_rate);
//! ```

pub mod error;
pub mod query;
pub mod stats;
pub mod store;
pub mod task;

// Re-export commonly used types
pub use error::{Result, TaskerError};
pub use query::{due_state, DueState, SortKey};
pub use stats::TaskStats;
pub use store::TaskStore;
pub use task::{Priority, Status, Task};
