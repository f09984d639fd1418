//! Read-only views over a store snapshot.
//!
//! Everything here is a pure function over `&[Task]`: filters and sorts
//! return a fresh `Vec<Task>` and never touch the input, and the due-state
//! classification is recomputed on every read rather than stored. "Today"
//! is always caller-supplied so results are deterministic under test.

use crate::task::{Status, Task};
use chrono::NaiveDate;
use clap::ValueEnum;
use std::cmp::Reverse;

/// Sort criterion for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Descending priority, ties broken by earliest created first.
    Priority,
    /// Ascending due date; tasks without one sort last.
    DueDate,
    /// Most recently created first.
    CreatedDate,
}

/// Derived deadline classification for a task. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    None,
    Overdue,
    DueToday,
}

/// Keep only tasks matching `status`, or all tasks when `None`.
#[must_use]
pub fn filter_by_status(tasks: &[Task], status: Option<Status>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .cloned()
        .collect()
}

/// Sort a snapshot by the given criterion.
///
/// All sorts are stable, so tasks that compare equal keep their insertion
/// order.
#[must_use]
pub fn sort_by(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    match key {
        SortKey::Priority => {
            sorted.sort_by_key(|t| (Reverse(t.priority), t.created_date));
        }
        SortKey::DueDate => {
            // Absent due dates compare as a maximal sentinel so they land
            // after every real deadline; the task itself is never touched.
            sorted.sort_by_key(|t| t.due_date.unwrap_or(NaiveDate::MAX));
        }
        SortKey::CreatedDate => {
            sorted.sort_by_key(|t| Reverse(t.created_date));
        }
    }
    sorted
}

/// The default listing: everything not Done, highest priority first.
#[must_use]
pub fn active_view(tasks: &[Task]) -> Vec<Task> {
    let active: Vec<Task> = tasks.iter().filter(|t| t.is_active()).cloned().collect();
    sort_by(&active, SortKey::Priority)
}

/// Classify a task's deadline relative to `today`.
///
/// Done tasks are never overdue or due, whatever their due date.
#[must_use]
pub fn due_state(task: &Task, today: NaiveDate) -> DueState {
    match task.due_date {
        Some(due) if task.is_active() && due < today => DueState::Overdue,
        Some(due) if task.is_active() && due == today => DueState::DueToday,
        _ => DueState::None,
    }
}
