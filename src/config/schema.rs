//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::domain::service::Service;

/// Root configuration for the broker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrokerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Catalog served by the bundled broker.
    pub catalog: CatalogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive, e.g. "service_broker_api=debug,tower_http=info".
    /// `RUST_LOG` takes precedence when set.
    pub log_filter: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Static catalog, in the wire format of `GET /v2/catalog`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub services: Vec<Service>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: BrokerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.limits.max_body_bytes, 1024 * 1024);
        assert!(!config.observability.metrics_enabled);
        assert!(config.catalog.services.is_empty());
    }

    #[test]
    fn test_catalog_from_toml() {
        let config: BrokerConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [[catalog.services]]
            id = "svc-1"
            name = "postgres"
            description = "Managed Postgres"
            bindable = true
            tags = ["sql"]

            [[catalog.services.plans]]
            id = "plan-1"
            name = "small"
            description = "One node"
            free = true

            [catalog.services.plans.maintenance_info]
            version = "1.2.0"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        let service = &config.catalog.services[0];
        assert_eq!(service.name, "postgres");
        let plan = service.plan("plan-1").unwrap();
        assert_eq!(plan.free, Some(true));
        assert_eq!(plan.maintenance_info.as_ref().unwrap().version, "1.2.0");
    }
}
