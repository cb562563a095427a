//! Reachability-style replies (`check_*` actions).
//!
//! These are pass-through: `status == "ok"` means success, any other value
//! means failure. No text heuristics apply.

use super::{non_empty_field, text_field};
use crate::types::{
    CanonicalStatus, CheckReport, CheckStatus, PrimaryValue, StatusDetail, StatusQueryKind,
    TriState,
};
use serde_json::Value;

pub(super) fn normalize_check(kind: StatusQueryKind, response: &Value) -> CanonicalStatus {
    let status = match response.get("status").and_then(Value::as_str) {
        Some("ok") => CheckStatus::Ok,
        Some(other) => CheckStatus::Failed(other.to_string()),
        None => CheckStatus::Missing,
    };
    // Unknown-action replies carry only `error`.
    let message = non_empty_field(response, "message").or_else(|| non_empty_field(response, "error"));
    let report = CheckReport {
        status,
        message,
        ip: non_empty_field(response, "ip"),
        output: non_empty_field(response, "output"),
    };

    let verdict = match (&report.status, kind) {
        (CheckStatus::Ok, StatusQueryKind::PublicAddress) => TriState::from_bool(report.ip.is_some()),
        (CheckStatus::Ok, _) => TriState::True,
        (CheckStatus::Failed(_), _) => TriState::False,
        (CheckStatus::Missing, _) => TriState::Unknown,
    };
    let primary_value = if kind == StatusQueryKind::PublicAddress && report.is_ok() {
        report.ip.clone().map(PrimaryValue::Text)
    } else {
        report.message.clone().map(PrimaryValue::Text)
    };
    let structured_fields_used = report.status != CheckStatus::Missing
        || report.message.is_some()
        || report.ip.is_some()
        || report.output.is_some();

    CanonicalStatus {
        kind,
        primary_value,
        verdict,
        raw_text: text_field(response, "output").to_string(),
        structured_fields_used,
        detail: StatusDetail::Check(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tone;
    use serde_json::json;

    #[test]
    fn ok_status_is_success() {
        let status = normalize_check(
            StatusQueryKind::InternetReachability,
            &json!({"status": "ok", "message": "Internet: OK"}),
        );
        assert_eq!(status.verdict, TriState::True);
        assert_eq!(status.check().map(CheckReport::tone), Some(Tone::Success));
        assert_eq!(status.primary_value, Some(PrimaryValue::Text("Internet: OK".into())));
    }

    #[test]
    fn any_other_status_is_failure_with_host_message() {
        let status = normalize_check(
            StatusQueryKind::GatewayReachability,
            &json!({"status": "error", "message": "No response from gateway"}),
        );
        let report = status.check().expect("check detail");
        assert_eq!(report.status, CheckStatus::Failed("error".into()));
        assert_eq!(report.tone(), Tone::Failure);
        assert_eq!(status.verdict, TriState::False);
        assert_eq!(report.message.as_deref(), Some("No response from gateway"));
    }

    #[test]
    fn dns_domain_output_is_kept_as_raw_text() {
        let status = normalize_check(
            StatusQueryKind::DnsResolution,
            &json!({"status": "ok", "message": "DNS resolving OK for example.org", "output": "93.184.216.34"}),
        );
        assert_eq!(status.raw_text, "93.184.216.34");
        assert_eq!(
            status.check().and_then(|r| r.output.as_deref()),
            Some("93.184.216.34")
        );
    }

    #[test]
    fn public_ip_is_primary_when_ok() {
        let status = normalize_check(
            StatusQueryKind::PublicAddress,
            &json!({"status": "ok", "ip": "203.0.113.9"}),
        );
        assert_eq!(status.primary_value, Some(PrimaryValue::Text("203.0.113.9".into())));
        assert_eq!(status.verdict, TriState::True);

        let no_ip = normalize_check(StatusQueryKind::PublicAddress, &json!({"status": "ok"}));
        assert_eq!(no_ip.verdict, TriState::False);
        assert!(no_ip.primary_value.is_none());
    }

    #[test]
    fn unknown_action_error_is_used_as_message() {
        let status = normalize_check(
            StatusQueryKind::GatewayReachability,
            &json!({"error": "Unknown action: check_gateway"}),
        );
        let report = status.check().expect("check detail");
        assert_eq!(report.status, CheckStatus::Missing);
        assert_eq!(report.message.as_deref(), Some("Unknown action: check_gateway"));
        assert_eq!(status.verdict, TriState::Unknown);
    }
}
