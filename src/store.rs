//! Task storage and persistence.
//!
//! The [`TaskStore`] owns the task collection and the id sequence, and keeps
//! both durable in a single JSON file. Loading is best-effort and
//! self-healing: a missing or malformed data file degrades to an empty store
//! rather than an error, so a damaged file can never wedge the program.
//! Every mutation persists before returning.
//!
//! # Example
//!
//! ```rust,ignore
//! use tasker::store::TaskStore;
//! use tasker::task::{Priority, Status};
//! use chrono::Local;
//!
//! let mut store = TaskStore::open("tasks.json");
//! let now = Local::now().naive_local();
//! let id = store.create("Write report", "", Priority::High, None, now)?.id;
//! store.update_status(id, Status::Done, now)?;
//! ```

use crate::error::{Result, TaskerError};
use crate::task::{Priority, Status, Task};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk document: the full task sequence plus the id counter.
///
/// Field order matters only cosmetically (tasks first, as existing files
/// have them), but every field round-trips exactly.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    tasks: Vec<Task>,
    next_id: u64,
}

/// The owning collection of all tasks plus the id-assignment sequence.
#[derive(Debug)]
pub struct TaskStore {
    /// Data file this store loads from and saves to.
    path: PathBuf,

    /// Tasks in insertion (= creation) order.
    tasks: Vec<Task>,

    /// Next id to assign. Always greater than every existing id and never
    /// decremented, so deleted ids are never reissued.
    next_id: u64,
}

impl TaskStore {
    /// Open a store backed by the given file, loading it if present.
    ///
    /// A missing file yields an empty store. A file that cannot be read or
    /// parsed also yields an empty store: the failure is logged as a warning
    /// and absorbed, never surfaced to the caller.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let (tasks, next_id) = Self::load(&path);
        Self {
            path,
            tasks,
            next_id,
        }
    }

    fn load(path: &Path) -> (Vec<Task>, u64) {
        if !path.exists() {
            debug!("No data file at {}, starting empty", path.display());
            return (Vec::new(), 1);
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read {}: {e}; starting empty", path.display());
                return (Vec::new(), 1);
            }
        };

        match serde_json::from_str::<StoreDocument>(&raw) {
            Ok(doc) => {
                // A hand-edited file may carry a stale counter; repair it
                // upward so ids stay unique. Never lower it.
                let max_id = doc.tasks.iter().map(|t| t.id).max().unwrap_or(0);
                let next_id = doc.next_id.max(max_id + 1);
                debug!(
                    "Loaded {} tasks from {} (next_id {})",
                    doc.tasks.len(),
                    path.display(),
                    next_id
                );
                (doc.tasks, next_id)
            }
            Err(e) => {
                warn!("Failed to parse {}: {e}; starting empty", path.display());
                (Vec::new(), 1)
            }
        }
    }

    /// Write the full task sequence and id counter to the data file,
    /// replacing its previous contents.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskerError::Persistence`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let doc = StoreDocument {
            tasks: self.tasks.clone(),
            next_id: self.next_id,
        };
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, json).map_err(|e| {
            TaskerError::persistence_with_path(
                format!("failed to write data file: {e}"),
                self.path.clone(),
            )
        })?;
        debug!("Saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    /// Save after a mutation. Failures are logged and absorbed: the mutation
    /// has already applied in memory and must not be reported as failed.
    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Save failed (in-memory state kept): {e}");
        }
    }

    /// Create a new task with status Todo and the next id in sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskerError::Validation`] if `title` is empty or
    /// whitespace-only.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> Result<&Task> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskerError::validation("title cannot be empty"));
        }

        let task = Task {
            id: self.next_id,
            title,
            description: description.into(),
            priority,
            status: Status::Todo,
            created_date: now,
            due_date,
            completed_date: None,
        };
        self.tasks.push(task);
        self.next_id += 1;
        self.persist();

        Ok(self.tasks.last().expect("task was just pushed"))
    }

    /// Look up a task by id. Not finding one is a normal outcome.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Change a task's status, maintaining the completion timestamp.
    ///
    /// Moving to Done from any other status stamps `completed_date = now`;
    /// Done to Done keeps the original stamp; any non-Done target clears the
    /// stamp unconditionally, even when it is already clear.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskerError::NotFound`] if no task has that id. The store
    /// is untouched and no save occurs.
    pub fn update_status(&mut self, id: u64, new_status: Status, now: NaiveDateTime) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskerError::NotFound { id })?;

        let old_status = task.status;
        task.status = new_status;

        if new_status == Status::Done && old_status != Status::Done {
            task.completed_date = Some(now);
        } else if new_status != Status::Done {
            task.completed_date = None;
        }

        self.persist();
        Ok(())
    }

    /// Remove a task permanently. Its id is never reissued.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskerError::NotFound`] if no task has that id. The store
    /// is untouched and no save occurs.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskerError::NotFound { id })?;

        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Read-only view of all tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The id the next created task will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Path of the backing data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn temp_store() -> (TempDir, TaskStore) {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::open(temp.path().join("tasks.json"));
        (temp, store)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_temp, store) = temp_store();
        assert!(store.tasks().is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let (_temp, mut store) = temp_store();

        let id_a = store
            .create("first", "", Priority::Medium, None, noon(1))
            .unwrap()
            .id;
        let id_b = store
            .create("second", "", Priority::Low, None, noon(2))
            .unwrap()
            .id;

        assert_eq!(id_a, 1);
        assert_eq!(id_b, 2);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let (_temp, mut store) = temp_store();

        let err = store
            .create("   ", "", Priority::Low, None, noon(1))
            .unwrap_err();
        assert!(matches!(err, TaskerError::Validation { .. }));
        assert!(store.tasks().is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_deleted_ids_are_never_reused() {
        let (_temp, mut store) = temp_store();

        store.create("a", "", Priority::Low, None, noon(1)).unwrap();
        let doomed = store
            .create("b", "", Priority::Low, None, noon(2))
            .unwrap()
            .id;
        store.delete(doomed).unwrap();

        let next = store
            .create("c", "", Priority::Low, None, noon(3))
            .unwrap()
            .id;
        assert_eq!(next, 3);
        assert!(store.find(doomed).is_none());
    }

    #[test]
    fn test_status_transitions_maintain_completed_date() {
        let (_temp, mut store) = temp_store();
        let id = store
            .create("task", "", Priority::Medium, None, noon(1))
            .unwrap()
            .id;

        store.update_status(id, Status::Done, noon(2)).unwrap();
        assert_eq!(store.find(id).unwrap().completed_date, Some(noon(2)));

        // Done -> Done keeps the original stamp
        store.update_status(id, Status::Done, noon(5)).unwrap();
        assert_eq!(store.find(id).unwrap().completed_date, Some(noon(2)));

        // Moving away from Done clears it
        store.update_status(id, Status::InProgress, noon(6)).unwrap();
        assert!(store.find(id).unwrap().completed_date.is_none());

        // Todo <-> InProgress stays clear
        store.update_status(id, Status::Todo, noon(7)).unwrap();
        assert!(store.find(id).unwrap().completed_date.is_none());
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (_temp, mut store) = temp_store();
        store.create("only", "", Priority::Low, None, noon(1)).unwrap();

        let err = store.update_status(99, Status::Done, noon(2)).unwrap_err();
        assert!(matches!(err, TaskerError::NotFound { id: 99 }));
        assert_eq!(store.find(1).unwrap().status, Status::Todo);
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let (_temp, mut store) = temp_store();
        let err = store.delete(5).unwrap_err();
        assert!(matches!(err, TaskerError::NotFound { id: 5 }));
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let mut store = TaskStore::open(&path);
        store
            .create(
                "with due",
                "notes",
                Priority::Urgent,
                NaiveDate::from_ymd_opt(2024, 2, 1),
                noon(1),
            )
            .unwrap();
        let done_id = store
            .create("finished", "", Priority::Low, None, noon(2))
            .unwrap()
            .id;
        store.update_status(done_id, Status::Done, noon(3)).unwrap();

        let reloaded = TaskStore::open(&path);
        assert_eq!(reloaded.tasks(), store.tasks());
        assert_eq!(reloaded.next_id(), store.next_id());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "{not valid json at all").unwrap();

        let store = TaskStore::open(&path);
        assert!(store.tasks().is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_stale_counter_is_repaired_on_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(
            &path,
            r#"{
              "tasks": [
                {
                  "id": 9,
                  "title": "hand edited",
                  "description": "",
                  "priority": 2,
                  "status": "todo",
                  "created_date": "2024-01-01 08:00:00",
                  "due_date": null,
                  "completed_date": null
                }
              ],
              "next_id": 1
            }"#,
        )
        .unwrap();

        let store = TaskStore::open(&path);
        assert_eq!(store.next_id(), 10);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let temp = TempDir::new().unwrap();
        // Point the store at a path whose parent does not exist so every
        // save fails.
        let path = temp.path().join("missing/dir/tasks.json");
        let mut store = TaskStore::open(&path);

        let id = store
            .create("survives", "", Priority::High, None, noon(1))
            .unwrap()
            .id;

        assert!(store.save().is_err());
        assert_eq!(store.find(id).unwrap().title, "survives");
        assert_eq!(store.next_id(), 2);
    }
}
