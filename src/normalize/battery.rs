//! Battery reply normalization (`get_battery`).

use super::{join_raw, text_field};
use crate::inference::infer_boolean;
use crate::types::{
    BatteryReading, CanonicalStatus, FieldSource, PrimaryValue, StatusDetail, StatusQueryKind,
    TriState,
};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+)%").expect("static pattern"))
}

/// Extract a percentage from the first non-empty line of `acpi -b` style text.
///
/// Only the first non-empty line is considered, and only its first
/// `<digits>%` occurrence. Digits are ASCII only.
pub fn percent_from_raw(raw: &str) -> Option<f64> {
    let line = raw.lines().map(str::trim).find(|line| !line.is_empty())?;
    let captures = percent_pattern().captures(line)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}

pub(super) fn normalize_battery(response: &Value) -> CanonicalStatus {
    let raw = text_field(response, "battery");
    let adapter_raw = text_field(response, "adapter_raw");

    let (percent, percent_source) = match response.get("percent").and_then(Value::as_f64) {
        Some(value) => (Some(value), FieldSource::Structured),
        None => match percent_from_raw(raw) {
            Some(value) => (Some(value), FieldSource::RawText),
            None => (None, FieldSource::Missing),
        },
    };

    let (charging, charging_source) = match response.get("charging").and_then(Value::as_bool) {
        Some(value) => (TriState::from_bool(value), FieldSource::Structured),
        None => {
            // Adapter output is the more direct signal; battery text is the fallback.
            let source_text = if adapter_raw.is_empty() { raw } else { adapter_raw };
            match infer_boolean(source_text) {
                TriState::Unknown => (TriState::Unknown, FieldSource::Missing),
                verdict => (verdict, FieldSource::RawText),
            }
        }
    };

    let reading = BatteryReading {
        percent,
        percent_source,
        charging,
        charging_source,
    };
    CanonicalStatus {
        kind: StatusQueryKind::Battery,
        primary_value: percent.map(PrimaryValue::Number),
        verdict: charging,
        raw_text: join_raw(&[raw, adapter_raw]),
        structured_fields_used: percent_source == FieldSource::Structured
            || charging_source == FieldSource::Structured,
        detail: StatusDetail::Battery(reading),
    }
}
