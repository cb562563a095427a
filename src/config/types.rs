//! Configuration data model.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{default_storage_path, DEFAULT_HOST_COMMAND};

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub host: HostConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

/// How to reach the native-messaging host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_HOST_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Colored terminal output.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// On-disk shape: every key optional, unknown keys rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConfig {
    pub host: FileHostConfig,
    pub storage: FileStorageConfig,
    pub display: FileDisplayConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileHostConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileStorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileDisplayConfig {
    pub color: Option<bool>,
}
