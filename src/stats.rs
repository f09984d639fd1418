//! Aggregate statistics over the full task set.

use crate::query::{due_state, DueState};
use crate::task::{Status, Task};
use chrono::NaiveDate;
use serde::Serialize;

/// Snapshot of counts and completion rate across every task in the store.
///
/// Status counts partition the whole set, so
/// `todo + in_progress + done == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,

    /// Tasks past their due date and not yet done.
    pub overdue: usize,

    /// Tasks due exactly today and not yet done.
    pub due_today: usize,

    /// Percentage of tasks done, rounded to one decimal. 0.0 for an empty
    /// store.
    pub completion_rate: f64,
}

/// Compute statistics for a snapshot, relative to the given `today`.
#[must_use]
pub fn compute(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let total = tasks.len();
    let todo = tasks.iter().filter(|t| t.status == Status::Todo).count();
    let in_progress = tasks
        .iter()
        .filter(|t| t.status == Status::InProgress)
        .count();
    let done = tasks.iter().filter(|t| t.status == Status::Done).count();

    let overdue = tasks
        .iter()
        .filter(|t| due_state(t, today) == DueState::Overdue)
        .count();
    let due_today = tasks
        .iter()
        .filter(|t| due_state(t, today) == DueState::DueToday)
        .count();

    let completion_rate = if total == 0 {
        0.0
    } else {
        (done as f64 / total as f64 * 1000.0).round() / 10.0
    };

    TaskStats {
        total,
        todo,
        in_progress,
        done,
        overdue,
        due_today,
        completion_rate,
    }
}
