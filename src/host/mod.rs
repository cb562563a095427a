//! Host channel: one-shot request/response calls to the local host process.
//!
//! The host is opaque. A call sends `{"action": ..., ...params}` and resolves
//! with exactly one JSON reply or a [`ChannelError`]. No timeout is applied
//! here; a hung host leaves the call pending.

pub mod native;

use crate::error::{ChannelError, QueryInputError};
use crate::types::StatusQueryKind;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

pub use native::NativeHostChannel;

/// Transport to the host process.
///
/// Implement this trait to plug in another transport; tests use scripted
/// in-memory channels.
#[async_trait]
pub trait HostChannel: Send + Sync {
    /// Send one request and await its single reply.
    async fn call(&self, request: &HostRequest) -> Result<Value, ChannelError>;
}

/// Actions understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAction {
    GetBattery,
    GetWifiPassword,
    GetDeviceInfo,
    CheckInternet,
    CheckDns,
    CheckDnsDomain,
    CheckGateway,
    CheckPublicIp,
}

impl HostAction {
    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetBattery => "get_battery",
            Self::GetWifiPassword => "get_wifi_password",
            Self::GetDeviceInfo => "get_device_info",
            Self::CheckInternet => "check_internet",
            Self::CheckDns => "check_dns",
            Self::CheckDnsDomain => "check_dns_domain",
            Self::CheckGateway => "check_gateway",
            Self::CheckPublicIp => "check_public_ip",
        }
    }
}

impl fmt::Display for HostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request: an action plus flat parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct HostRequest {
    pub action: HostAction,
    pub params: Map<String, Value>,
}

impl HostRequest {
    pub fn new(action: HostAction) -> Self {
        Self {
            action,
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Wire message: params are flattened next to `action`.
    pub fn to_message(&self) -> Value {
        let mut message = self.params.clone();
        message.insert("action".to_string(), Value::from(self.action.as_str()));
        Value::Object(message)
    }
}

/// A concrete status query the UI can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusQuery {
    Battery,
    WifiCredential,
    DeviceIdentity,
    InternetReachability,
    /// `None` checks the host's default domain.
    DnsResolution { domain: Option<String> },
    GatewayReachability,
    PublicAddress,
}

impl StatusQuery {
    /// Build a DNS query for a user-entered domain.
    pub fn dns_domain(input: &str) -> Result<Self, QueryInputError> {
        let domain = input.trim();
        if domain.is_empty() {
            return Err(QueryInputError::EmptyDomain);
        }
        Ok(Self::DnsResolution {
            domain: Some(domain.to_string()),
        })
    }

    pub fn kind(&self) -> StatusQueryKind {
        match self {
            Self::Battery => StatusQueryKind::Battery,
            Self::WifiCredential => StatusQueryKind::WifiCredential,
            Self::DeviceIdentity => StatusQueryKind::DeviceIdentity,
            Self::InternetReachability => StatusQueryKind::InternetReachability,
            Self::DnsResolution { .. } => StatusQueryKind::DnsResolution,
            Self::GatewayReachability => StatusQueryKind::GatewayReachability,
            Self::PublicAddress => StatusQueryKind::PublicAddress,
        }
    }

    /// The user-supplied domain, when this is a custom DNS query.
    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::DnsResolution { domain } => domain.as_deref(),
            _ => None,
        }
    }

    pub fn request(&self) -> HostRequest {
        match self {
            Self::Battery => HostRequest::new(HostAction::GetBattery),
            Self::WifiCredential => HostRequest::new(HostAction::GetWifiPassword),
            Self::DeviceIdentity => HostRequest::new(HostAction::GetDeviceInfo),
            Self::InternetReachability => HostRequest::new(HostAction::CheckInternet),
            Self::DnsResolution { domain: None } => HostRequest::new(HostAction::CheckDns),
            Self::DnsResolution {
                domain: Some(domain),
            } => HostRequest::new(HostAction::CheckDnsDomain).with_param("domain", domain.as_str()),
            Self::GatewayReachability => HostRequest::new(HostAction::CheckGateway),
            Self::PublicAddress => HostRequest::new(HostAction::CheckPublicIp),
        }
    }

    /// Queries issued when the status view opens.
    pub fn startup_set() -> Vec<StatusQuery> {
        vec![Self::Battery, Self::DeviceIdentity, Self::WifiCredential]
    }
}
