//! Status board: issues host queries and keeps the latest result per kind.
//!
//! Each query is independent. A channel failure only affects the query that
//! hit it, and when two queries of the same kind overlap the one that
//! resolves last is kept. Sensitive values (Wi-Fi password, hostname, IP)
//! live in [`RevealField`]s owned by the board.

use crate::host::{HostChannel, StatusQuery};
use crate::normalize::normalize;
use crate::reveal::RevealField;
use crate::types::{CanonicalStatus, StatusQueryKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Display text for a field whose source query could not reach the host.
pub const FIELD_ERROR_TEXT: &str = "Error";

/// Result of one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The host replied; the reply may still report a failed check.
    Resolved {
        query: StatusQuery,
        status: CanonicalStatus,
    },
    /// The host could not be reached.
    ChannelFailed { query: StatusQuery, error: String },
}

impl QueryOutcome {
    pub fn query(&self) -> &StatusQuery {
        match self {
            Self::Resolved { query, .. } | Self::ChannelFailed { query, .. } => query,
        }
    }

    pub fn kind(&self) -> StatusQueryKind {
        self.query().kind()
    }

    pub fn status(&self) -> Option<&CanonicalStatus> {
        match self {
            Self::Resolved { status, .. } => Some(status),
            Self::ChannelFailed { .. } => None,
        }
    }

    pub fn is_channel_failure(&self) -> bool {
        matches!(self, Self::ChannelFailed { .. })
    }
}

/// Sensitive fields with reveal toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensitiveField {
    WifiPassword,
    Hostname,
    IpAddress,
}

impl SensitiveField {
    fn source_kind(self) -> StatusQueryKind {
        match self {
            Self::WifiPassword => StatusQueryKind::WifiCredential,
            Self::Hostname | Self::IpAddress => StatusQueryKind::DeviceIdentity,
        }
    }
}

/// Issue one query and normalize the reply.
pub async fn fetch(channel: &dyn HostChannel, query: StatusQuery) -> QueryOutcome {
    let request = query.request();
    match channel.call(&request).await {
        Ok(reply) => {
            let status = normalize(query.kind(), &reply);
            QueryOutcome::Resolved { query, status }
        }
        Err(err) => {
            tracing::warn!(action = %request.action, error = %err, "host call failed");
            QueryOutcome::ChannelFailed {
                query,
                error: err.to_string(),
            }
        }
    }
}

/// Latest status per kind plus reveal state for sensitive fields.
pub struct StatusBoard {
    channel: Arc<dyn HostChannel>,
    latest: BTreeMap<StatusQueryKind, QueryOutcome>,
    wifi_ssid: Option<String>,
    wifi_password: RevealField,
    hostname: RevealField,
    ip: RevealField,
}

impl StatusBoard {
    pub fn new(channel: Arc<dyn HostChannel>) -> Self {
        Self {
            channel,
            latest: BTreeMap::new(),
            wifi_ssid: None,
            wifi_password: RevealField::new(),
            hostname: RevealField::new(),
            ip: RevealField::new(),
        }
    }

    /// Run one query to completion and record its outcome.
    pub async fn refresh(&mut self, query: StatusQuery) -> &QueryOutcome {
        let kind = query.kind();
        let outcome = fetch(self.channel.as_ref(), query).await;
        self.apply(outcome);
        &self.latest[&kind]
    }

    /// Run queries concurrently, recording each outcome as it resolves.
    pub async fn refresh_all(&mut self, queries: impl IntoIterator<Item = StatusQuery>) {
        let mut pending = JoinSet::new();
        for query in queries {
            let channel = Arc::clone(&self.channel);
            pending.spawn(async move { fetch(channel.as_ref(), query).await });
        }
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok(outcome) => self.apply(outcome),
                Err(err) => tracing::warn!(error = %err, "status query task failed"),
            }
        }
    }

    /// Record an outcome, replacing any earlier one of the same kind.
    pub fn apply(&mut self, outcome: QueryOutcome) {
        match (&outcome, outcome.kind()) {
            (QueryOutcome::Resolved { status, .. }, StatusQueryKind::WifiCredential) => {
                let credential = status.wifi().cloned().unwrap_or_default();
                self.wifi_ssid = credential.ssid;
                self.wifi_password
                    .load(credential.password.unwrap_or_default());
            }
            (QueryOutcome::ChannelFailed { .. }, StatusQueryKind::WifiCredential) => {
                self.wifi_ssid = None;
                self.wifi_password.fail();
            }
            (QueryOutcome::Resolved { status, .. }, StatusQueryKind::DeviceIdentity) => {
                let identity = status.device().cloned().unwrap_or_default();
                self.hostname.load(identity.hostname.unwrap_or_default());
                self.ip.load(identity.ip.unwrap_or_default());
            }
            (QueryOutcome::ChannelFailed { .. }, StatusQueryKind::DeviceIdentity) => {
                self.hostname.fail();
                self.ip.fail();
            }
            _ => {}
        }
        self.latest.insert(outcome.kind(), outcome);
    }

    pub fn outcome(&self, kind: StatusQueryKind) -> Option<&QueryOutcome> {
        self.latest.get(&kind)
    }

    pub fn field(&self, field: SensitiveField) -> &RevealField {
        match field {
            SensitiveField::WifiPassword => &self.wifi_password,
            SensitiveField::Hostname => &self.hostname,
            SensitiveField::IpAddress => &self.ip,
        }
    }

    /// Toggle a field's visibility. Returns `false` when the field is empty.
    pub fn toggle(&mut self, field: SensitiveField) -> bool {
        match field {
            SensitiveField::WifiPassword => self.wifi_password.toggle(),
            SensitiveField::Hostname => self.hostname.toggle(),
            SensitiveField::IpAddress => self.ip.toggle(),
        }
    }

    /// Text to show for a sensitive field.
    pub fn field_display(&self, field: SensitiveField) -> String {
        if self.source_failed(field.source_kind()) {
            return FIELD_ERROR_TEXT.to_string();
        }
        self.field(field).display()
    }

    /// Text to show for the connected network name.
    pub fn ssid_display(&self) -> String {
        if self.source_failed(StatusQueryKind::WifiCredential) {
            return FIELD_ERROR_TEXT.to_string();
        }
        self.wifi_ssid.clone().unwrap_or_else(|| "-".to_string())
    }

    /// Clipboard payload for the device card, using actual values.
    pub fn device_copy_text(&self) -> String {
        format!(
            "Hostname: {}\nIP Address: {}",
            self.copy_value(SensitiveField::Hostname),
            self.copy_value(SensitiveField::IpAddress)
        )
    }

    /// Clipboard payload for the Wi-Fi card, using the actual password.
    pub fn wifi_copy_text(&self) -> String {
        format!(
            "Wi-Fi: {}\nPassword: {}",
            self.ssid_display(),
            self.copy_value(SensitiveField::WifiPassword)
        )
    }

    fn copy_value(&self, field: SensitiveField) -> String {
        match self.field(field).actual() {
            Some(actual) => actual.to_string(),
            None => self.field_display(field),
        }
    }

    fn source_failed(&self, kind: StatusQueryKind) -> bool {
        self.latest
            .get(&kind)
            .is_some_and(QueryOutcome::is_channel_failure)
    }
}
