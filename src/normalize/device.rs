//! Device identity normalization (`get_device_info`). Structured only.

use super::non_empty_field;
use crate::types::{
    CanonicalStatus, DeviceIdentity, PrimaryValue, StatusDetail, StatusQueryKind, TriState,
};
use serde_json::Value;

pub(super) fn normalize_device(response: &Value) -> CanonicalStatus {
    let identity = DeviceIdentity {
        hostname: non_empty_field(response, "hostname"),
        ip: non_empty_field(response, "ip"),
    };
    let found = identity.hostname.is_some() || identity.ip.is_some();
    CanonicalStatus {
        kind: StatusQueryKind::DeviceIdentity,
        primary_value: identity.hostname.clone().map(PrimaryValue::Text),
        verdict: if found {
            TriState::True
        } else {
            TriState::Unknown
        },
        raw_text: String::new(),
        structured_fields_used: found,
        detail: StatusDetail::Device(identity),
    }
}
