//! Task list persistence across sessions backed by the JSON file store.

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use sysglance::error::TaskListError;
use sysglance::storage::{JsonFileStore, KeyValueStore};
use sysglance::tasks::{TaskList, MAX_TASKS, TASKS_STORAGE_KEY};

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "sysglance-it-{name}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    fn store_path(&self) -> PathBuf {
        self.0.join("data").join("storage.json")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn stored_tasks(path: &Path) -> Value {
    let raw = fs::read_to_string(path).unwrap();
    let namespace: Value = serde_json::from_str(&raw).unwrap();
    namespace[TASKS_STORAGE_KEY].clone()
}

#[test]
fn edits_survive_a_new_session() {
    let dir = TempDir::new("session");
    let path = dir.store_path();

    let mut first = TaskList::open(JsonFileStore::new(&path));
    assert!(first.is_empty());
    first.add().unwrap();
    first.update_text(0, "renew certificate").unwrap();
    first.add().unwrap();
    first.update_text(1, "rotate logs").unwrap();
    first.set_done(0, true).unwrap();

    let second = TaskList::open(JsonFileStore::new(&path));
    assert_eq!(second.len(), 2);
    assert_eq!(second.tasks()[0].text, "renew certificate");
    assert!(second.tasks()[0].done);
    assert_eq!(second.tasks()[1].text, "rotate logs");
    assert!(!second.tasks()[1].done);
}

#[test]
fn removal_is_persisted_as_a_full_snapshot() {
    let dir = TempDir::new("remove");
    let path = dir.store_path();

    let mut list = TaskList::open(JsonFileStore::new(&path));
    for text in ["a", "b", "c"] {
        let index = list.add().unwrap();
        list.update_text(index, text).unwrap();
    }
    list.remove(0).unwrap();

    assert_eq!(
        stored_tasks(&path),
        json!([{"text": "b", "done": false}, {"text": "c", "done": false}])
    );
}

#[test]
fn other_keys_in_the_namespace_are_preserved() {
    let dir = TempDir::new("namespace");
    let path = dir.store_path();
    let store = JsonFileStore::new(&path);
    let mut entries = Map::new();
    entries.insert("theme".to_string(), json!("dark"));
    store.set(entries).unwrap();

    let mut list = TaskList::open(JsonFileStore::new(&path));
    list.add().unwrap();

    let got = store.get(&["theme", TASKS_STORAGE_KEY]).unwrap();
    assert_eq!(got.get("theme"), Some(&json!("dark")));
    assert_eq!(got.get(TASKS_STORAGE_KEY), Some(&json!([{"text": "", "done": false}])));
}

#[test]
fn corrupt_storage_file_starts_an_empty_list() {
    let dir = TempDir::new("corrupt");
    let path = dir.store_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{\"tasks\": \"not a list\"}").unwrap();

    let mut list = TaskList::open(JsonFileStore::new(&path));
    assert!(list.is_empty());
    list.add().unwrap();
    assert_eq!(stored_tasks(&path), json!([{"text": "", "done": false}]));
}

#[test]
fn capacity_is_enforced_across_sessions() {
    let dir = TempDir::new("capacity");
    let path = dir.store_path();

    let mut list = TaskList::open(JsonFileStore::new(&path));
    for _ in 0..MAX_TASKS {
        list.add().unwrap();
    }

    let mut reopened = TaskList::open(JsonFileStore::new(&path));
    assert!(reopened.is_full());
    let err = reopened.add().unwrap_err();
    assert_eq!(err, TaskListError::CapacityReached { max: MAX_TASKS });
    assert_eq!(err.to_string(), "Maximum tasks reached (20).");
    assert_eq!(stored_tasks(&path).as_array().map(Vec::len), Some(MAX_TASKS));
}
