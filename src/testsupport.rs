//! Shared test fixtures: temp directories and a scripted host channel.

use crate::error::ChannelError;
use crate::host::{HostChannel, HostRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("sysglance-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

enum Scripted {
    Reply(Value),
    Fail,
}

/// Host channel answering from per-action queues.
///
/// Replies for one action are served in the order they were scripted; the
/// last one repeats. Unscripted actions fail with [`ChannelError::Closed`].
#[derive(Default)]
pub struct ScriptedChannel {
    script: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<Value>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, action: &'static str, reply: Value) -> Self {
        self.push(action, Scripted::Reply(reply))
    }

    pub fn fail(self, action: &'static str) -> Self {
        self.push(action, Scripted::Fail)
    }

    /// Wire messages received so far.
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn push(self, action: &'static str, entry: Scripted) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .entry(action)
            .or_default()
            .push_back(entry);
        self
    }
}

#[async_trait]
impl HostChannel for ScriptedChannel {
    async fn call(&self, request: &HostRequest) -> Result<Value, ChannelError> {
        self.calls.lock().expect("calls lock").push(request.to_message());
        let mut script = self.script.lock().expect("script lock");
        let queue = match script.get_mut(request.action.as_str()) {
            Some(queue) => queue,
            None => return Err(ChannelError::Closed),
        };
        let entry = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|entry| match entry {
                Scripted::Reply(value) => Scripted::Reply(value.clone()),
                Scripted::Fail => Scripted::Fail,
            })
        };
        match entry {
            Some(Scripted::Reply(value)) => Ok(value),
            Some(Scripted::Fail) | None => Err(ChannelError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostAction;
    use serde_json::json;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.path().exists());
    }

    #[tokio::test]
    async fn scripted_channel_serves_queue_then_repeats_last() {
        let channel = ScriptedChannel::new()
            .reply("check_dns", json!({"n": 1}))
            .reply("check_dns", json!({"n": 2}));
        let request = HostRequest::new(HostAction::CheckDns);
        assert_eq!(channel.call(&request).await.unwrap(), json!({"n": 1}));
        assert_eq!(channel.call(&request).await.unwrap(), json!({"n": 2}));
        assert_eq!(channel.call(&request).await.unwrap(), json!({"n": 2}));
        assert_eq!(channel.calls().len(), 3);
    }

    #[tokio::test]
    async fn unscripted_action_fails() {
        let channel = ScriptedChannel::new();
        let result = channel.call(&HostRequest::new(HostAction::GetBattery)).await;
        assert!(matches!(result, Err(ChannelError::Closed)));
    }
}
