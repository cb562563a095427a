//! Key-value persistence boundary.
//!
//! The store is a single namespace of JSON values addressed by string keys,
//! mirroring the browser `storage.sync` get/set surface. [`JsonFileStore`]
//! keeps the namespace in one JSON object file; [`MemoryStore`] backs tests
//! and ephemeral sessions.

use crate::error::StorageError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Minimal get/set persistence service.
pub trait KeyValueStore: Send + Sync {
    /// Return the stored values for `keys`. Missing keys are omitted.
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError>;

    /// Upsert `entries`, leaving other keys untouched.
    fn set(&self, entries: Map<String, Value>) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store. Counts writes and can be told to fail them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries (does not count as a write).
    pub fn with_entries(entries: Map<String, Value>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Make subsequent `set` calls fail with an io error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Snapshot of one stored value.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Map<String, Value>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let entries = self.lock();
        Ok(select_keys(&entries, keys))
    }

    fn set(&self, entries: Map<String, Value>) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory store writes disabled",
            )));
        }
        self.lock().extend(entries);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// File-backed store holding the whole namespace as one JSON object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the namespace. A missing file is an empty namespace.
    fn read_namespace(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StorageError::Io(err)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StorageError::Malformed(format!(
                "{} holds a JSON {} instead of an object",
                self.path.display(),
                json_type_name(&other)
            ))),
            Err(err) => Err(StorageError::Malformed(format!(
                "failed to parse {}: {err}",
                self.path.display()
            ))),
        }
    }

    fn write_namespace(&self, namespace: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(namespace)?;
        // Write a sibling temp file and rename it over the target so a partial
        // write never replaces the last good snapshot.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let namespace = self.read_namespace()?;
        Ok(select_keys(&namespace, keys))
    }

    fn set(&self, entries: Map<String, Value>) -> Result<(), StorageError> {
        let mut namespace = match self.read_namespace() {
            Ok(namespace) => namespace,
            Err(StorageError::Malformed(reason)) => {
                tracing::warn!(%reason, "replacing malformed storage file");
                Map::new()
            }
            Err(err) => return Err(err),
        };
        namespace.extend(entries);
        self.write_namespace(&namespace)?;
        tracing::debug!(path = %self.path.display(), "storage written");
        Ok(())
    }
}

fn select_keys(entries: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            entries
                .get(*key)
                .map(|value| ((*key).to_string(), value.clone()))
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
