//! Host response normalization.
//!
//! Turns a raw host reply for one [`StatusQueryKind`] into a
//! [`CanonicalStatus`]. Normalization is a pure function of its inputs and is
//! total: missing or mistyped fields degrade to `None`/[`TriState::Unknown`]
//! instead of failing. When a structured field is present and correctly typed
//! it is used as-is and raw-text parsing for that field is skipped.
//!
//! [`TriState::Unknown`]: crate::types::TriState::Unknown

mod battery;
mod checks;
mod device;
mod wifi;

use crate::types::{CanonicalStatus, StatusQueryKind};
use serde_json::Value;

pub use battery::percent_from_raw;
pub use wifi::parse_wifi_credential;

/// Normalize one host reply for `kind`.
///
/// Non-object replies (including `null`) are treated like an empty object.
pub fn normalize(kind: StatusQueryKind, response: &Value) -> CanonicalStatus {
    match kind {
        StatusQueryKind::Battery => battery::normalize_battery(response),
        StatusQueryKind::WifiCredential => wifi::normalize_wifi(response),
        StatusQueryKind::DeviceIdentity => device::normalize_device(response),
        StatusQueryKind::InternetReachability
        | StatusQueryKind::DnsResolution
        | StatusQueryKind::GatewayReachability
        | StatusQueryKind::PublicAddress => checks::normalize_check(kind, response),
    }
}

/// Borrow a string field, or `""` when absent or not a string.
fn text_field<'a>(response: &'a Value, key: &str) -> &'a str {
    response.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Owned non-empty string field.
fn non_empty_field(response: &Value, key: &str) -> Option<String> {
    let value = text_field(response, key);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Join the non-empty raw text blocks of a reply.
fn join_raw(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}
