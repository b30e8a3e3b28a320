//! Catalog model advertised through `GET /v2/catalog`.
//!
//! Shapes follow the Open Service Broker catalog object. Fields that the
//! protocol marks optional are skipped when unset so that the serialized
//! catalog never carries `null` placeholders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A service offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub bindable: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub instances_retrievable: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub bindings_retrievable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(rename = "plan_updateable", default)]
    pub plan_updatable: bool,

    #[serde(default)]
    pub plans: Vec<ServicePlan>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequiredPermission>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ServiceMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_client: Option<ServiceDashboardClient>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_context_updates: bool,
}

impl Service {
    /// Find one of this service's plans by id.
    pub fn plan(&self, plan_id: &str) -> Option<&ServicePlan> {
        self.plans.iter().find(|plan| plan.id == plan_id)
    }
}

/// Permissions a service can require from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPermission {
    SyslogDrain,
    RouteForwarding,
    VolumeMount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDashboardClient {
    pub id: String,
    pub secret: String,
    pub redirect_uri: String,
}

/// A plan of a service offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ServicePlanMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<ServiceSchemas>,

    #[serde(rename = "plan_updateable", default, skip_serializing_if = "Option::is_none")]
    pub plan_updatable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_polling_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_info: Option<MaintenanceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchemas {
    #[serde(rename = "service_instance", default)]
    pub instance: ServiceInstanceSchema,

    #[serde(rename = "service_binding", default)]
    pub binding: ServiceBindingSchema,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceSchema {
    #[serde(default)]
    pub create: Schema,
    #[serde(default)]
    pub update: Schema,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceBindingSchema {
    #[serde(default)]
    pub create: Schema,
}

/// JSON schema for configuration parameters. Opaque to this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePlanMetadata {
    #[serde(rename = "displayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub costs: Vec<ServicePlanCost>,

    /// Broker-specific keys, emitted alongside the well-known ones.
    #[serde(flatten)]
    pub additional_metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePlanCost {
    pub amount: std::collections::BTreeMap<String, f64>,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    #[serde(rename = "displayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(rename = "imageUrl", default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,

    #[serde(rename = "longDescription", default, skip_serializing_if = "String::is_empty")]
    pub long_description: String,

    #[serde(rename = "providerDisplayName", default, skip_serializing_if = "String::is_empty")]
    pub provider_display_name: String,

    #[serde(rename = "documentationUrl", default, skip_serializing_if = "String::is_empty")]
    pub documentation_url: String,

    #[serde(rename = "supportUrl", default, skip_serializing_if = "String::is_empty")]
    pub support_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,

    #[serde(flatten)]
    pub additional_metadata: Map<String, Value>,
}

/// Maintenance information of a plan, compared on provision and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceInfo {
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub public: std::collections::BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl MaintenanceInfo {
    /// Two maintenance infos describe the same release when their public,
    /// private and version parts agree. Descriptions are informational only.
    pub fn matches(&self, other: &MaintenanceInfo) -> bool {
        self.public == other.public && self.private == other.private && self.version == other.version
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
