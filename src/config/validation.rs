//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and limits
//! - Check catalog integrity (ids present and unique)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: `&BrokerConfig → Result<(), Vec<ValidationError>>`

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BrokerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("catalog service #{index} has an empty id")]
    EmptyServiceId { index: usize },

    #[error("catalog service '{0}' is defined more than once")]
    DuplicateServiceId(String),

    #[error("service '{service_id}' has a plan with an empty id")]
    EmptyPlanId { service_id: String },

    #[error("plan '{0}' is defined more than once")]
    DuplicatePlanId(String),
}

pub fn validate_config(config: &BrokerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    // Plan ids are global in the protocol, not per service.
    let mut service_ids = HashSet::new();
    let mut plan_ids = HashSet::new();
    for (index, service) in config.catalog.services.iter().enumerate() {
        if service.id.is_empty() {
            errors.push(ValidationError::EmptyServiceId { index });
        } else if !service_ids.insert(service.id.as_str()) {
            errors.push(ValidationError::DuplicateServiceId(service.id.clone()));
        }

        for plan in &service.plans {
            if plan.id.is_empty() {
                errors.push(ValidationError::EmptyPlanId {
                    service_id: service.id.clone(),
                });
            } else if !plan_ids.insert(plan.id.as_str()) {
                errors.push(ValidationError::DuplicatePlanId(plan.id.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
