//! Request validation performed before the backend is called.
//!
//! Every failure here is answered locally with a 4xx [`ErrorResponse`]; the
//! backend never sees the request.
//!
//! [`ErrorResponse`]: crate::domain::apiresponses::ErrorResponse

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::service::{MaintenanceInfo, Service, ServicePlan};
use crate::domain::apiresponses::{errors, FailureResponse};
use crate::http::version::{ApiVersion, ApiVersionError};

pub const API_VERSION_INVALID_KEY: &str = "broker-api-version-invalid";
pub const SERVICE_ID_MISSING_KEY: &str = "service-id-missing";
pub const PLAN_ID_MISSING_KEY: &str = "plan-id-missing";
pub const INSTANCE_ID_MISSING_KEY: &str = "instance-id-missing";
pub const BINDING_ID_MISSING_KEY: &str = "binding-id-missing";
pub const INVALID_SERVICE_ID_KEY: &str = "invalid-service-id";
pub const INVALID_PLAN_ID_KEY: &str = "invalid-plan-id";
pub const INVALID_DETAILS_KEY: &str = "invalid-details";
pub const INVALID_QUERY_KEY: &str = "invalid-query";
pub const BODY_TOO_LARGE_KEY: &str = "body-too-large";
pub const INVALID_PATH_KEY: &str = "invalid-path";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    #[error(transparent)]
    ApiVersion(#[from] ApiVersionError),

    #[error("{operation} endpoint only supported starting with OSB version {required}")]
    VersionTooLow {
        operation: &'static str,
        required: ApiVersion,
    },

    #[error("service_id missing")]
    ServiceIdMissing,

    #[error("plan_id missing")]
    PlanIdMissing,

    #[error("instance_id missing")]
    InstanceIdMissing,

    #[error("binding_id missing")]
    BindingIdMissing,

    #[error("service-id not in the catalog")]
    InvalidServiceId,

    #[error("plan-id not in the catalog")]
    InvalidPlanId,

    /// The body could not be decoded into the operation's details.
    #[error("{0}")]
    InvalidDetails(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0}")]
    BodyTooLarge(String),

    /// A path segment could not be decoded.
    #[error("{0}")]
    InvalidPath(String),
}

impl NegotiationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            NegotiationError::ApiVersion(_) | NegotiationError::VersionTooLow { .. } => {
                StatusCode::PRECONDITION_FAILED
            }
            NegotiationError::InvalidDetails(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NegotiationError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn logger_action(&self) -> &'static str {
        match self {
            NegotiationError::ApiVersion(_) | NegotiationError::VersionTooLow { .. } => {
                API_VERSION_INVALID_KEY
            }
            NegotiationError::ServiceIdMissing => SERVICE_ID_MISSING_KEY,
            NegotiationError::PlanIdMissing => PLAN_ID_MISSING_KEY,
            NegotiationError::InstanceIdMissing => INSTANCE_ID_MISSING_KEY,
            NegotiationError::BindingIdMissing => BINDING_ID_MISSING_KEY,
            NegotiationError::InvalidServiceId => INVALID_SERVICE_ID_KEY,
            NegotiationError::InvalidPlanId => INVALID_PLAN_ID_KEY,
            NegotiationError::InvalidDetails(_) => INVALID_DETAILS_KEY,
            NegotiationError::InvalidQuery(_) => INVALID_QUERY_KEY,
            NegotiationError::BodyTooLarge(_) => BODY_TOO_LARGE_KEY,
            NegotiationError::InvalidPath(_) => INVALID_PATH_KEY,
        }
    }
}

/// Reject versions older than `required` for `operation`.
pub fn require_version(
    version: ApiVersion,
    required: ApiVersion,
    operation: &'static str,
) -> Result<(), NegotiationError> {
    if version.at_least(required) {
        Ok(())
    } else {
        Err(NegotiationError::VersionTooLow { operation, required })
    }
}

pub fn require_instance_id(instance_id: &str) -> Result<(), NegotiationError> {
    require(instance_id, NegotiationError::InstanceIdMissing)
}

pub fn require_binding_id(binding_id: &str) -> Result<(), NegotiationError> {
    require(binding_id, NegotiationError::BindingIdMissing)
}

/// Both `service_id` and `plan_id` must be set; `service_id` is checked first.
pub fn require_service_and_plan(service_id: &str, plan_id: &str) -> Result<(), NegotiationError> {
    require(service_id, NegotiationError::ServiceIdMissing)?;
    require(plan_id, NegotiationError::PlanIdMissing)
}

pub fn require_service_id(service_id: &str) -> Result<(), NegotiationError> {
    require(service_id, NegotiationError::ServiceIdMissing)
}

fn require(value: &str, missing: NegotiationError) -> Result<(), NegotiationError> {
    if value.is_empty() {
        Err(missing)
    } else {
        Ok(())
    }
}

/// Resolve the service and plan of a request against the catalog.
///
/// The plan must belong to the resolved service.
pub fn resolve_catalog_entry(
    services: Vec<Service>,
    service_id: &str,
    plan_id: &str,
) -> Result<(Service, ServicePlan), NegotiationError> {
    let service = services
        .into_iter()
        .find(|service| service.id == service_id)
        .ok_or(NegotiationError::InvalidServiceId)?;
    let plan = service
        .plan(plan_id)
        .cloned()
        .ok_or(NegotiationError::InvalidPlanId)?;
    Ok((service, plan))
}

/// Compare the requested maintenance info with the plan's.
pub fn check_maintenance_info(
    requested: Option<&MaintenanceInfo>,
    plan: &ServicePlan,
) -> Result<(), FailureResponse> {
    let Some(requested) = requested else {
        return Ok(());
    };
    match &plan.maintenance_info {
        None => Err(errors::maintenance_info_nil_conflict()),
        Some(catalog) if !catalog.matches(requested) => Err(errors::maintenance_info_conflict()),
        Some(_) => Ok(()),
    }
}
