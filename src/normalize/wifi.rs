//! Wi-Fi credential normalization (`get_wifi_password`).

use super::text_field;
use crate::types::{
    CanonicalStatus, PrimaryValue, StatusDetail, StatusQueryKind, TriState, WifiCredential,
};
use serde_json::Value;

const SSID_PREFIX: &str = "SSID:";
const PASSWORD_PREFIX: &str = "Password:";
/// Literal the host prints when its tool invocation fails.
const HOST_ERROR_SENTINEL: &str = "error";

/// Parse `SSID:` / `Password:` lines from `nmcli ... show-password` output.
///
/// Lines are scanned in order and a later matching line replaces an earlier
/// one. A password of `error` is treated as absent.
pub fn parse_wifi_credential(raw: &str) -> WifiCredential {
    let mut ssid: Option<String> = None;
    let mut password: Option<String> = None;
    for line in raw.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(SSID_PREFIX) {
            ssid = Some(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix(PASSWORD_PREFIX) {
            password = Some(rest.trim().to_string());
        }
    }
    WifiCredential {
        ssid: ssid.filter(|value| !value.is_empty()),
        password: password.filter(|value| !value.is_empty() && value != HOST_ERROR_SENTINEL),
    }
}

pub(super) fn normalize_wifi(response: &Value) -> CanonicalStatus {
    let raw = text_field(response, "wifi_password");
    let credential = parse_wifi_credential(raw);
    let verdict = if credential.ssid.is_none() && credential.password.is_none() {
        TriState::Unknown
    } else {
        TriState::from_bool(credential.password.is_some())
    };
    CanonicalStatus {
        kind: StatusQueryKind::WifiCredential,
        primary_value: credential.ssid.clone().map(PrimaryValue::Text),
        verdict,
        raw_text: raw.to_string(),
        structured_fields_used: false,
        detail: StatusDetail::Wifi(credential),
    }
}
