//! Canonical status model shared by the normalizer, the status board and
//! presentation helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which host query a response belongs to. Selects the normalizer rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusQueryKind {
    Battery,
    WifiCredential,
    DeviceIdentity,
    InternetReachability,
    DnsResolution,
    GatewayReachability,
    PublicAddress,
}

impl StatusQueryKind {
    /// Every kind, in display order.
    pub const ALL: [StatusQueryKind; 7] = [
        Self::Battery,
        Self::WifiCredential,
        Self::DeviceIdentity,
        Self::InternetReachability,
        Self::DnsResolution,
        Self::GatewayReachability,
        Self::PublicAddress,
    ];

    /// Short human label used in section headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Battery => "Battery",
            Self::WifiCredential => "Wi-Fi",
            Self::DeviceIdentity => "Device",
            Self::InternetReachability => "Internet",
            Self::DnsResolution => "DNS",
            Self::GatewayReachability => "Gateway",
            Self::PublicAddress => "Public IP",
        }
    }

    /// True for the `{status, message}` reachability-style kinds.
    pub fn is_check(self) -> bool {
        matches!(
            self,
            Self::InternetReachability
                | Self::DnsResolution
                | Self::GatewayReachability
                | Self::PublicAddress
        )
    }
}

impl fmt::Display for StatusQueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boolean-like verdict with an explicit, displayable "unknown" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// `Some(bool)` for a decided verdict, `None` for `Unknown`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

/// Kind-dependent headline value of a canonical status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryValue {
    Text(String),
    Number(f64),
}

/// Where a single normalized field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Taken from a correctly typed structured field.
    Structured,
    /// Recovered from raw tool text.
    RawText,
    #[default]
    Missing,
}

/// Presentation tone for a status line (maps to a color in the renderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
    Muted,
    Unknown,
    /// The host could not be contacted at all.
    Error,
}

/// Normalized battery reading.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatteryReading {
    /// Percentage as reported; not clamped here.
    pub percent: Option<f64>,
    pub percent_source: FieldSource,
    pub charging: TriState,
    pub charging_source: FieldSource,
}

impl BatteryReading {
    /// Percentage clamped to `[0, 100]` for display and gauge width.
    pub fn display_percent(&self) -> Option<f64> {
        self.percent.map(|value| value.clamp(0.0, 100.0))
    }
}

/// Connected network credentials parsed from host tool output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WifiCredential {
    pub ssid: Option<String>,
    /// `None` when the tool printed no password or reported `error`.
    pub password: Option<String>,
}

/// Host identity as reported by the host process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DeviceIdentity {
    pub hostname: Option<String>,
    pub ip: Option<String>,
}

/// `status` field of a reachability-style reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    /// Any status string other than `"ok"`.
    Failed(String),
    /// No string `status` field in the reply.
    #[default]
    Missing,
}

/// Reachability-style reply (`check_*` actions).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub message: Option<String>,
    /// Public address, only meaningful for `check_public_ip`.
    pub ip: Option<String>,
    /// Raw resolver output, only sent by `check_dns_domain`.
    pub output: Option<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }

    /// `"ok"` maps to success; anything else, including a missing status, to failure.
    pub fn tone(&self) -> Tone {
        if self.is_ok() {
            Tone::Success
        } else {
            Tone::Failure
        }
    }
}

/// Kind-specific part of a canonical status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusDetail {
    Battery(BatteryReading),
    Wifi(WifiCredential),
    Device(DeviceIdentity),
    Check(CheckReport),
}

/// Result of normalizing one host response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalStatus {
    pub kind: StatusQueryKind,
    pub primary_value: Option<PrimaryValue>,
    pub verdict: TriState,
    /// Raw tool text carried by the response, joined when several fields exist.
    pub raw_text: String,
    /// True when at least one correctly typed structured field was used.
    pub structured_fields_used: bool,
    pub detail: StatusDetail,
}

impl CanonicalStatus {
    pub fn battery(&self) -> Option<&BatteryReading> {
        match &self.detail {
            StatusDetail::Battery(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn wifi(&self) -> Option<&WifiCredential> {
        match &self.detail {
            StatusDetail::Wifi(credential) => Some(credential),
            _ => None,
        }
    }

    pub fn device(&self) -> Option<&DeviceIdentity> {
        match &self.detail {
            StatusDetail::Device(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn check(&self) -> Option<&CheckReport> {
        match &self.detail {
            StatusDetail::Check(report) => Some(report),
            _ => None,
        }
    }
}
