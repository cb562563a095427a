//! Bounded, persisted task list.
//!
//! The in-memory list is the source of truth. Storage only seeds it once at
//! startup; afterwards every successful mutation writes the full list back
//! under [`TASKS_STORAGE_KEY`]. Write failures are logged and never reach the
//! caller.

use crate::error::TaskListError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum number of tasks the list will hold.
pub const MAX_TASKS: usize = 20;
/// Storage key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "tasks";
/// Hint shown when the list is empty.
pub const EMPTY_LIST_HINT: &str = "No tasks yet. Click 'Add Task' to create one.";

/// One user-editable task row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Ordered task list mirrored to a [`KeyValueStore`].
pub struct TaskList<S: KeyValueStore> {
    tasks: Vec<Task>,
    store: S,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Start a session: seed the list from `store`.
    ///
    /// Unreadable or malformed stored data yields an empty list.
    pub fn open(store: S) -> Self {
        let persisted = match store.get(&[TASKS_STORAGE_KEY]) {
            Ok(mut entries) => entries.remove(TASKS_STORAGE_KEY),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored tasks; starting empty");
                None
            }
        };
        let mut list = Self {
            tasks: Vec::new(),
            store,
        };
        list.load_initial(persisted);
        list
    }

    /// Replace the in-memory list wholesale with `persisted` when it is a
    /// well-formed task array, otherwise start empty. Does not write back.
    pub fn load_initial(&mut self, persisted: Option<Value>) {
        self.tasks = match persisted {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => match serde_json::from_value::<Vec<Task>>(value) {
                Ok(mut tasks) => {
                    if tasks.len() > MAX_TASKS {
                        tracing::warn!(stored = tasks.len(), "stored task list over capacity; truncating");
                        tasks.truncate(MAX_TASKS);
                    }
                    tasks
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored tasks are malformed; starting empty");
                    Vec::new()
                }
            },
        };
    }

    /// Append an empty, unchecked task. Returns its index.
    pub fn add(&mut self) -> Result<usize, TaskListError> {
        if self.tasks.len() >= MAX_TASKS {
            return Err(TaskListError::CapacityReached { max: MAX_TASKS });
        }
        self.tasks.push(Task::default());
        self.persist();
        Ok(self.tasks.len() - 1)
    }

    /// Replace the text of the task at `index`.
    pub fn update_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), TaskListError> {
        self.task_mut(index)?.text = text.into();
        self.persist();
        Ok(())
    }

    /// Set the checkbox state of the task at `index`.
    pub fn set_done(&mut self, index: usize, done: bool) -> Result<(), TaskListError> {
        self.task_mut(index)?.done = done;
        self.persist();
        Ok(())
    }

    /// Delete the task at `index`; later tasks shift left by one.
    pub fn remove(&mut self, index: usize) -> Result<Task, TaskListError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.len() >= MAX_TASKS
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn check_index(&self, index: usize) -> Result<(), TaskListError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskListError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task, TaskListError> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }

    /// Write the full list snapshot. Failures are logged only.
    fn persist(&self) {
        let snapshot = match serde_json::to_value(&self.tasks) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize tasks");
                return;
            }
        };
        let mut entries = Map::new();
        entries.insert(TASKS_STORAGE_KEY.to_string(), snapshot);
        match self.store.set(entries) {
            Ok(()) => tracing::debug!(count = self.tasks.len(), "tasks persisted"),
            Err(err) => tracing::warn!(error = %err, "failed to persist tasks"),
        }
    }
}

/// Placeholder text for the task row at `index` (1-based label).
pub fn task_placeholder(index: usize) -> String {
    format!("Task {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn seeded(value: Value) -> TaskList<MemoryStore> {
        let mut entries = Map::new();
        entries.insert(TASKS_STORAGE_KEY.to_string(), value);
        TaskList::open(MemoryStore::with_entries(entries))
    }

    fn texts(list: &TaskList<MemoryStore>) -> Vec<&str> {
        list.tasks().iter().map(|task| task.text.as_str()).collect()
    }

    #[test]
    fn open_seeds_from_storage_without_writing() {
        let list = seeded(json!([{"text": "a", "done": true}, {"text": "b", "done": false}]));
        assert_eq!(texts(&list), vec!["a", "b"]);
        assert!(list.tasks()[0].done);
        assert_eq!(list.store().write_count(), 0);
    }

    #[test]
    fn malformed_storage_starts_empty() {
        assert!(seeded(json!({"text": "not a list"})).is_empty());
        assert!(seeded(json!("tasks")).is_empty());
        assert!(seeded(json!([1, 2])).is_empty());
        assert!(seeded(Value::Null).is_empty());
    }

    #[test]
    fn partial_task_objects_use_defaults() {
        let list = seeded(json!([{"text": "only text"}, {}]));
        assert_eq!(
            list.tasks(),
            &[
                Task {
                    text: "only text".into(),
                    done: false
                },
                Task::default()
            ]
        );
    }

    #[test]
    fn add_appends_empty_task_and_persists() {
        let mut list = TaskList::open(MemoryStore::new());
        assert_eq!(list.add(), Ok(0));
        assert_eq!(list.tasks(), &[Task::default()]);
        assert_eq!(list.store().write_count(), 1);
        assert_eq!(
            list.store().value(TASKS_STORAGE_KEY),
            Some(json!([{"text": "", "done": false}]))
        );
    }

    #[test]
    fn add_beyond_capacity_signals_and_does_not_mutate() {
        let mut list = TaskList::open(MemoryStore::new());
        for _ in 0..MAX_TASKS {
            list.add().unwrap();
        }
        let writes = list.store().write_count();
        assert_eq!(
            list.add(),
            Err(TaskListError::CapacityReached { max: MAX_TASKS })
        );
        assert_eq!(list.len(), MAX_TASKS);
        assert!(list.is_full());
        assert_eq!(list.store().write_count(), writes);
    }

    #[test]
    fn every_edit_writes_a_full_snapshot() {
        let mut list = TaskList::open(MemoryStore::new());
        list.add().unwrap();
        for partial in ["b", "bu", "buy"] {
            list.update_text(0, partial).unwrap();
        }
        list.set_done(0, true).unwrap();
        assert_eq!(list.store().write_count(), 5);
        assert_eq!(
            list.store().value(TASKS_STORAGE_KEY),
            Some(json!([{"text": "buy", "done": true}]))
        );
    }

    #[test]
    fn out_of_range_edits_are_rejected_without_writes() {
        let mut list = seeded(json!([{"text": "a", "done": false}]));
        assert_eq!(
            list.update_text(3, "x"),
            Err(TaskListError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert!(list.set_done(1, true).is_err());
        assert!(list.remove(1).is_err());
        assert_eq!(texts(&list), vec!["a"]);
        assert_eq!(list.store().write_count(), 0);
    }

    #[test]
    fn remove_shifts_later_tasks_left() {
        let mut list = seeded(json!([
            {"text": "a"}, {"text": "b"}, {"text": "c"}, {"text": "d"}
        ]));
        let removed = list.remove(1).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(texts(&list), vec!["a", "c", "d"]);
        assert_eq!(
            list.store().value(TASKS_STORAGE_KEY),
            Some(json!([
                {"text": "a", "done": false},
                {"text": "c", "done": false},
                {"text": "d", "done": false}
            ]))
        );
    }

    #[test]
    fn persistence_failures_do_not_block_mutation() {
        let mut list = TaskList::open(MemoryStore::new());
        list.store().set_fail_writes(true);
        assert_eq!(list.add(), Ok(0));
        list.update_text(0, "still here").unwrap();
        assert_eq!(texts(&list), vec!["still here"]);
        assert_eq!(list.store().value(TASKS_STORAGE_KEY), None);
    }

    #[test]
    fn oversized_stored_list_is_truncated() {
        let stored: Vec<Value> = (0..25).map(|i| json!({"text": format!("t{i}")})).collect();
        let list = seeded(Value::Array(stored));
        assert_eq!(list.len(), MAX_TASKS);
        assert_eq!(list.tasks()[19].text, "t19");
    }

    #[test]
    fn placeholder_is_one_based() {
        assert_eq!(task_placeholder(0), "Task 1");
    }
}
