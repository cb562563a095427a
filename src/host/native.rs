//! Native-messaging transport.
//!
//! Frames are a 4-byte little-endian length followed by that many bytes of
//! UTF-8 JSON, the format browser native-messaging hosts speak on stdio. Each
//! call spawns the host, writes one request frame, closes the host's stdin and
//! reads one reply frame. A host that fails to produce a valid reply is killed
//! rather than waited on.

use super::{HostChannel, HostRequest};
use crate::error::ChannelError;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};

/// Largest reply accepted from a host (1 MiB).
pub const MAX_REPLY_BYTES: u32 = 1024 * 1024;

/// Encode one message as a length-prefixed frame.
pub fn encode_frame(message: &Value) -> Result<Vec<u8>, ChannelError> {
    let body = serde_json::to_vec(message).map_err(ChannelError::Encode)?;
    let len = u32::try_from(body.len()).map_err(|_| ChannelError::FrameTooLarge(u32::MAX))?;
    let mut frame = Vec::with_capacity(body.len() + 4);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Write one framed message and flush.
pub async fn write_frame<W>(writer: &mut W, message: &Value) -> Result<(), ChannelError>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(message)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed message of at most `max_len` bytes.
///
/// End-of-stream before a complete frame maps to [`ChannelError::Closed`].
pub async fn read_frame<R>(reader: &mut R, max_len: u32) -> Result<Value, ChannelError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 4];
    reader.read_exact(&mut header).await.map_err(map_eof)?;
    let len = u32::from_le_bytes(header);
    if len > max_len {
        return Err(ChannelError::FrameTooLarge(len));
    }
    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await.map_err(map_eof)?;
    serde_json::from_slice(&body).map_err(ChannelError::Decode)
}

fn map_eof(err: std::io::Error) -> ChannelError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        ChannelError::Closed
    } else {
        ChannelError::Io(err)
    }
}

/// Host channel that spawns a native-messaging host executable per call.
#[derive(Debug, Clone)]
pub struct NativeHostChannel {
    command: PathBuf,
    args: Vec<String>,
}

impl NativeHostChannel {
    pub fn new(command: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

#[async_trait]
impl HostChannel for NativeHostChannel {
    async fn call(&self, request: &HostRequest) -> Result<Value, ChannelError> {
        let action = request.action.as_str();
        tracing::debug!(action, host = %self.command.display(), "host call");

        let mut cmd = Command::new(&self.command);
        // Dropping an in-flight call must not leave the host running.
        cmd.kill_on_drop(true);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        let mut child = cmd.spawn().map_err(ChannelError::Spawn)?;

        let mut stdin = child.stdin.take().ok_or(ChannelError::Closed)?;
        let mut stdout = child.stdout.take().ok_or(ChannelError::Closed)?;
        let written = write_frame(&mut stdin, &request.to_message()).await;
        // EOF on stdin ends the host's read loop.
        drop(stdin);
        match written {
            Ok(()) => {}
            // The host may reply without reading the request; its reply is
            // still in the pipe.
            Err(ChannelError::Io(err)) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!(action, "host closed stdin before the request was written");
            }
            Err(err) => {
                drop(stdout);
                abort_host(&mut child, action).await;
                return Err(err);
            }
        }

        let reply = read_frame(&mut stdout, MAX_REPLY_BYTES).await;
        drop(stdout);
        if reply.is_err() {
            // Unread output would block the host forever on a full pipe.
            abort_host(&mut child, action).await;
        } else {
            reap_host(&mut child, action).await;
        }

        // A `null` reply is treated like an empty object.
        match reply? {
            Value::Null => Ok(Value::Object(serde_json::Map::new())),
            value => Ok(value),
        }
    }
}

async fn reap_host(child: &mut Child, action: &str) {
    match child.wait().await {
        Ok(status) if !status.success() => {
            tracing::debug!(action, %status, "host exited with failure status");
        }
        Ok(_) => {}
        Err(err) => tracing::debug!(action, error = %err, "failed to reap host"),
    }
}

async fn abort_host(child: &mut Child, action: &str) {
    if let Err(err) = child.start_kill() {
        tracing::debug!(action, error = %err, "failed to kill host");
    }
    reap_host(child, action).await;
}
