//! Error types shared across the host channel, storage and config layers.

use std::fmt;

// ---------------------------------------------------------------------------
// ChannelError
// ---------------------------------------------------------------------------

/// Transport-level failures reaching the host process.
///
/// A well-formed reply carrying `status != "ok"` is never a `ChannelError`;
/// that outcome is modeled by the normalizer.
#[derive(Debug)]
pub enum ChannelError {
    /// The host executable could not be started.
    Spawn(std::io::Error),
    /// Reading or writing the host's stdio failed.
    Io(std::io::Error),
    /// The host exited or closed stdout before sending a reply.
    Closed,
    /// The host announced a reply larger than the accepted frame size.
    FrameTooLarge(u32),
    /// The request could not be serialized.
    Encode(serde_json::Error),
    /// The reply frame was not valid JSON.
    Decode(serde_json::Error),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to start host: {e}"),
            Self::Io(e) => write!(f, "host io: {e}"),
            Self::Closed => write!(f, "host closed the channel without replying"),
            Self::FrameTooLarge(len) => write!(f, "host reply of {len} bytes exceeds frame limit"),
            Self::Encode(e) => write!(f, "encode request: {e}"),
            Self::Decode(e) => write!(f, "decode reply: {e}"),
        }
    }
}

impl std::error::Error for ChannelError {}

impl From<std::io::Error> for ChannelError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors from the key-value persistence boundary.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    /// Stored bytes exist but are not a JSON object namespace.
    Malformed(String),
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Malformed(msg) => write!(f, "malformed storage: {msg}"),
            Self::Serialize(e) => write!(f, "serialize: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// TaskListError
// ---------------------------------------------------------------------------

/// Rejected task-list edits. The list is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListError {
    /// `add` was called with the list already at capacity.
    CapacityReached { max: usize },
    /// The index does not address an existing task.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for TaskListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityReached { max } => write!(f, "Maximum tasks reached ({max})."),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "no task at position {index} (list has {len})")
            }
        }
    }
}

impl std::error::Error for TaskListError {}

// ---------------------------------------------------------------------------
// QueryInputError
// ---------------------------------------------------------------------------

/// User input rejected before any host call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInputError {
    EmptyDomain,
}

impl fmt::Display for QueryInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain => write!(f, "Please enter a domain."),
        }
    }
}

impl std::error::Error for QueryInputError {}
