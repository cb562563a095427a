//! Display text, tones and gauge values derived from query outcomes.

use crate::board::QueryOutcome;
use crate::types::{BatteryReading, CheckReport, StatusQueryKind, Tone, TriState};

/// Shown when a query never reached the host.
pub const CHANNEL_ERROR_TEXT: &str = "Error contacting native host.";
/// Shown for a public-address check with neither an address nor a message.
pub const PUBLIC_IP_FALLBACK_TEXT: &str = "Unable to fetch public IP";

/// One line of status text plus its tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Color band of the battery gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    High,
    Medium,
    Low,
}

impl BatteryLevel {
    pub fn for_percent(percent: f64) -> Self {
        if percent > 50.0 {
            Self::High
        } else if percent > 20.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Everything the battery card renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryView {
    pub percent_text: String,
    pub status: StatusLine,
    /// Gauge fill in `[0, 100]`.
    pub fill_percent: f64,
    /// `None` when no percentage is known.
    pub level: Option<BatteryLevel>,
    pub charging: bool,
}

/// Everything a check row renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckView {
    pub line: StatusLine,
    /// Raw tool output shown under the line, when the host sent any.
    pub detail: Option<String>,
}

pub fn battery_view(outcome: &QueryOutcome) -> BatteryView {
    let reading = match outcome.status().and_then(|status| status.battery()) {
        Some(reading) => reading,
        None => {
            return BatteryView {
                percent_text: "--%".to_string(),
                status: StatusLine::new("Error", Tone::Error),
                fill_percent: 0.0,
                level: None,
                charging: false,
            }
        }
    };
    let percent = reading.display_percent();
    BatteryView {
        percent_text: percent_label(percent),
        status: battery_status_line(reading),
        fill_percent: percent.unwrap_or(0.0),
        level: percent.map(BatteryLevel::for_percent),
        charging: reading.charging == TriState::True,
    }
}

/// `"87%"`, `"87.5%"` or `"--%"` when unknown.
pub fn percent_label(percent: Option<f64>) -> String {
    match percent {
        Some(value) if value.fract() == 0.0 => format!("{value:.0}%"),
        Some(value) => format!("{value}%"),
        None => "--%".to_string(),
    }
}

pub fn battery_status_line(reading: &BatteryReading) -> StatusLine {
    match reading.charging {
        TriState::True => StatusLine::new("Charging \u{2022} Yes", Tone::Success),
        TriState::False if reading.display_percent().is_some_and(|p| p >= 99.0) => {
            StatusLine::new("Full \u{2022} No", Tone::Muted)
        }
        TriState::False => StatusLine::new("Charging \u{2022} No", Tone::Failure),
        TriState::Unknown => StatusLine::new("Unknown", Tone::Unknown),
    }
}

/// Row for any reachability-style outcome.
pub fn check_view(outcome: &QueryOutcome) -> CheckView {
    let report = match outcome.status().and_then(|status| status.check()) {
        Some(report) => report,
        None => {
            return CheckView {
                line: StatusLine::new(CHANNEL_ERROR_TEXT, Tone::Error),
                detail: None,
            }
        }
    };
    let line = match (outcome.kind(), outcome.query().domain()) {
        (StatusQueryKind::DnsResolution, Some(domain)) => dns_domain_line(domain, report),
        (StatusQueryKind::PublicAddress, _) => public_address_line(report),
        _ => StatusLine::new(report.message.clone().unwrap_or_default(), report.tone()),
    };
    CheckView {
        line,
        detail: report.output.clone().filter(|output| !output.trim().is_empty()),
    }
}

fn dns_domain_line(domain: &str, report: &CheckReport) -> StatusLine {
    if report.is_ok() {
        StatusLine::new(format!("DNS OK for {domain}"), Tone::Success)
    } else {
        let message = report.message.as_deref().unwrap_or_default();
        StatusLine::new(format!("DNS issue for {domain}: {message}"), Tone::Failure)
    }
}

fn public_address_line(report: &CheckReport) -> StatusLine {
    match (&report.ip, &report.message) {
        (Some(ip), _) if report.is_ok() => StatusLine::new(ip.clone(), Tone::Success),
        (_, Some(message)) => StatusLine::new(message.clone(), Tone::Failure),
        _ => StatusLine::new(PUBLIC_IP_FALLBACK_TEXT, Tone::Failure),
    }
}
