//! sysglance: a quick look at local battery, network and device status.
//!
//! Status comes from a local native-messaging host process that runs OS
//! tools and replies with loosely structured JSON. This crate normalizes
//! those replies into a canonical model, keeps sensitive values masked until
//! revealed, and maintains a small persisted task list.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sysglance::board::{SensitiveField, StatusBoard};
//! use sysglance::host::{NativeHostChannel, StatusQuery};
//!
//! # async fn example() {
//! let channel = NativeHostChannel::new("local_sysinfo_host", Vec::new());
//! let mut board = StatusBoard::new(Arc::new(channel));
//! board.refresh_all(StatusQuery::startup_set()).await;
//! println!("{}", board.field_display(SensitiveField::WifiPassword));
//! # }
//! ```

pub mod board;
pub mod build_info;
pub mod config;
pub mod error;
pub mod host;
pub mod inference;
pub mod normalize;
pub mod present;
pub mod render;
pub mod reveal;
pub mod storage;
pub mod tasks;
#[cfg(test)]
pub mod testsupport;
pub mod types;
