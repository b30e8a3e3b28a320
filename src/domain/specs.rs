//! Results returned by the backend for each operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Labels and attributes a backend attaches to an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceMetadata {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub labels: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl InstanceMetadata {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.attributes.is_empty()
    }

    /// `None` when there is nothing to report, so responses omit the field.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionedServiceSpec {
    pub is_async: bool,
    /// The instance already existed with identical attributes.
    pub already_exists: bool,
    pub dashboard_url: Option<String>,
    pub operation_data: Option<String>,
    pub metadata: InstanceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateServiceSpec {
    pub is_async: bool,
    pub dashboard_url: Option<String>,
    pub operation_data: Option<String>,
    pub metadata: InstanceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprovisionServiceSpec {
    pub is_async: bool,
    pub operation_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetInstanceDetailsSpec {
    pub service_id: String,
    pub plan_id: String,
    pub dashboard_url: Option<String>,
    pub parameters: Option<Value>,
    pub metadata: InstanceMetadata,
}

/// State reported by a last operation poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastOperationState {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "succeeded")]
    Succeeded,
    #[serde(rename = "failed")]
    Failed,
}

impl LastOperationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LastOperationState::InProgress => "in progress",
            LastOperationState::Succeeded => "succeeded",
            LastOperationState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LastOperationState::InProgress)
    }
}

impl std::fmt::Display for LastOperationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastOperation {
    pub state: LastOperationState,
    pub description: Option<String>,
}

/// Validity window of a binding's credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expires_at: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub renew_before: String,
}

impl BindingMetadata {
    pub fn is_empty(&self) -> bool {
        self.expires_at.is_empty() && self.renew_before.is_empty()
    }

    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeMount {
    pub driver: String,
    pub container_dir: String,
    pub mode: String,
    pub device_type: String,
    pub device: SharedDevice,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedDevice {
    pub volume_id: String,
    #[serde(default)]
    pub mount_config: Map<String, Value>,
}

/// Network endpoint a bound application may reach the instance on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
}

/// Result of a bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    pub is_async: bool,
    pub already_exists: bool,
    pub operation_data: Option<String>,
    pub credentials: Option<Value>,
    pub syslog_drain_url: Option<String>,
    pub route_service_url: Option<String>,
    pub backup_agent_url: Option<String>,
    pub volume_mounts: Vec<VolumeMount>,
    pub endpoints: Vec<Endpoint>,
    pub metadata: BindingMetadata,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetBindingSpec {
    pub credentials: Option<Value>,
    pub syslog_drain_url: Option<String>,
    pub route_service_url: Option<String>,
    pub volume_mounts: Vec<VolumeMount>,
    pub parameters: Option<Value>,
    pub endpoints: Vec<Endpoint>,
    pub metadata: BindingMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnbindSpec {
    pub is_async: bool,
    pub operation_data: Option<String>,
}
