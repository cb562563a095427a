//! Native-messaging transport against a real spawned host.
//!
//! The host is `sh` reading the request header and then replaying a
//! pre-framed reply from a file, so no JSON parsing is needed on its side.
#![cfg(unix)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use sysglance::board::{SensitiveField, StatusBoard};
use sysglance::error::ChannelError;
use sysglance::host::native::encode_frame;
use sysglance::host::{HostChannel, NativeHostChannel, StatusQuery};
use sysglance::present::battery_view;
use sysglance::types::StatusQueryKind;

fn fixture_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "sysglance-native-{name}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Host that answers every request with `reply`.
fn replaying_host(dir: &Path, reply: &Value) -> NativeHostChannel {
    let frame_path = dir.join("reply.bin");
    fs::write(&frame_path, encode_frame(reply).unwrap()).unwrap();
    let script = format!("head -c 4 >/dev/null; cat '{}'", frame_path.display());
    NativeHostChannel::new("sh", vec!["-c".to_string(), script])
}

#[tokio::test]
async fn battery_reply_flows_from_host_to_view() {
    let dir = fixture_dir("battery");
    let host = replaying_host(
        &dir,
        &json!({
            "battery": "Battery 0: Charging, 99%, 00:05:00 until charged",
            "adapter_raw": "Adapter 0: on-line",
            "percent": 99,
            "charging": true
        }),
    );
    let mut board = StatusBoard::new(Arc::new(host));
    board.refresh(StatusQuery::Battery).await;

    let view = battery_view(board.outcome(StatusQueryKind::Battery).unwrap());
    assert_eq!(view.percent_text, "99%");
    assert_eq!(view.status.text, "Charging \u{2022} Yes");
    let _ = fs::remove_dir_all(dir);
}

#[tokio::test]
async fn null_reply_is_an_empty_object() {
    let dir = fixture_dir("null");
    let host = replaying_host(&dir, &Value::Null);
    let reply = host.call(&StatusQuery::DeviceIdentity.request()).await.unwrap();
    assert_eq!(reply, json!({}));

    let mut board = StatusBoard::new(Arc::new(host));
    board.refresh(StatusQuery::DeviceIdentity).await;
    assert_eq!(board.field_display(SensitiveField::Hostname), "-");
    let _ = fs::remove_dir_all(dir);
}

#[tokio::test]
async fn host_that_never_replies_is_closed() {
    let host = NativeHostChannel::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
    let result = host.call(&StatusQuery::PublicAddress.request()).await;
    // Exiting before the request is written still reads as a closed host.
    assert!(matches!(result, Err(ChannelError::Closed)), "got {result:?}");
}
