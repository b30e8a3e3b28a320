//! Operation details handed to the backend.
//!
//! Each value is assembled by a handler from the validated request (body,
//! query string) and moved into the matching [`ServiceBroker`] call.
//!
//! [`ServiceBroker`]: crate::domain::ServiceBroker

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::service::MaintenanceInfo;

/// Body of `PUT /v2/service_instances/{instance_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvisionDetails {
    #[serde(default)]
    pub service_id: String,

    #[serde(default)]
    pub plan_id: String,

    #[serde(default)]
    pub organization_guid: String,

    #[serde(default)]
    pub space_guid: String,

    /// Platform specific context, passed through untouched.
    #[serde(rename = "context", default, skip_serializing_if = "Option::is_none")]
    pub raw_context: Option<Value>,

    /// Caller supplied configuration parameters, passed through untouched.
    #[serde(rename = "parameters", default, skip_serializing_if = "Option::is_none")]
    pub raw_parameters: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

/// Body of `PATCH /v2/service_instances/{instance_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDetails {
    #[serde(default)]
    pub service_id: String,

    #[serde(default)]
    pub plan_id: String,

    #[serde(rename = "parameters", default, skip_serializing_if = "Option::is_none")]
    pub raw_parameters: Option<Value>,

    #[serde(default)]
    pub previous_values: PreviousValues,

    #[serde(rename = "context", default, skip_serializing_if = "Option::is_none")]
    pub raw_context: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

/// Values of the instance prior to an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviousValues {
    #[serde(default)]
    pub plan_id: String,

    #[serde(default)]
    pub service_id: String,

    #[serde(rename = "organization_id", default)]
    pub org_id: String,

    #[serde(default)]
    pub space_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

/// Query parameters of `DELETE /v2/service_instances/{instance_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprovisionDetails {
    pub plan_id: String,
    pub service_id: String,
    pub force: bool,
}

/// Query parameters of `GET /v2/service_instances/{instance_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchInstanceDetails {
    pub service_id: String,
    pub plan_id: String,
}

/// Query parameters of `GET .../service_bindings/{binding_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchBindingDetails {
    pub service_id: String,
    pub plan_id: String,
}

/// Query parameters of both `last_operation` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollDetails {
    pub service_id: String,
    pub plan_id: String,
    /// The opaque `operation` value a previous 202 response returned.
    pub operation_data: String,
}

/// Body of `PUT .../service_bindings/{binding_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindDetails {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app_guid: String,

    #[serde(default)]
    pub plan_id: String,

    #[serde(default)]
    pub service_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_resource: Option<BindResource>,

    #[serde(rename = "context", default, skip_serializing_if = "Option::is_none")]
    pub raw_context: Option<Value>,

    #[serde(rename = "parameters", default, skip_serializing_if = "Option::is_none")]
    pub raw_parameters: Option<Value>,
}

impl BindDetails {
    /// The application a binding is for, preferring `bind_resource.app_guid`
    /// over the deprecated top level field.
    pub fn app_guid(&self) -> Option<&str> {
        self.bind_resource
            .as_ref()
            .map(|resource| resource.app_guid.as_str())
            .filter(|guid| !guid.is_empty())
            .or_else(|| Some(self.app_guid.as_str()).filter(|guid| !guid.is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindResource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app_guid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub space_guid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub route: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credential_client_id: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub backup_agent: bool,
}

/// Query parameters of `DELETE .../service_bindings/{binding_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnbindDetails {
    pub plan_id: String,
    pub service_id: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}
