//! Failures defined by the protocol itself.
//!
//! Backends return these so that platforms can react to well-known
//! conditions (conflicts, missing resources, async required) uniformly.

use axum::http::StatusCode;

use crate::domain::apiresponses::failure::FailureResponse;

const INSTANCE_EXISTS_MSG: &str = "instance already exists";
const INSTANCE_DOESNT_EXIST_MSG: &str = "instance does not exist";
const SERVICE_LIMIT_REACHED_MSG: &str = "instance limit for this service has been reached";
const BINDING_EXISTS_MSG: &str = "binding already exists";
const BINDING_DOESNT_EXIST_MSG: &str = "binding does not exist";
const BINDING_NOT_FOUND_MSG: &str = "binding cannot be fetched";
const ASYNC_REQUIRED_MSG: &str =
    "This service plan requires client support for asynchronous service operations.";
const PLAN_CHANGE_UNSUPPORTED_MSG: &str = "The requested plan migration cannot be performed";
const RAW_INVALID_PARAMS_MSG: &str = "The format of the parameters is not valid JSON";
const APP_GUID_MISSING_MSG: &str = "app_guid is a required field but was not provided";
const CONCURRENT_INSTANCE_ACCESS_MSG: &str = "instance is being updated and cannot be retrieved";
const MAINTENANCE_INFO_CONFLICT_MSG: &str =
    "passed maintenance_info does not match the catalog maintenance_info";
const MAINTENANCE_INFO_NIL_CONFLICT_MSG: &str =
    "maintenance_info was passed, but the broker catalog contains no maintenance_info";

const INSTANCE_LIMIT_REACHED_ERROR_KEY: &str = "instance-limit-reached";
const INSTANCE_ALREADY_EXISTS_ERROR_KEY: &str = "instance-already-exists";
const BINDING_ALREADY_EXISTS_ERROR_KEY: &str = "binding-already-exists";
const INSTANCE_MISSING_ERROR_KEY: &str = "instance-missing";
const BINDING_MISSING_ERROR_KEY: &str = "binding-missing";
const BINDING_NOT_FOUND_ERROR_KEY: &str = "binding-not-found";
const ASYNC_REQUIRED_KEY: &str = "async-required";
const PLAN_CHANGE_NOT_SUPPORTED_KEY: &str = "plan-change-not-supported";
const INVALID_RAW_PARAMS_KEY: &str = "invalid-raw-params";
const APP_GUID_NOT_PROVIDED_ERROR_KEY: &str = "app-guid-not-provided";
const CONCURRENT_ACCESS_KEY: &str = "get-instance-during-update";
const MAINTENANCE_INFO_CONFLICT_KEY: &str = "maintenance-info-conflict";

pub fn instance_already_exists() -> FailureResponse {
    FailureResponse::builder(INSTANCE_EXISTS_MSG, StatusCode::CONFLICT, INSTANCE_ALREADY_EXISTS_ERROR_KEY)
        .with_empty_response()
        .build()
}

pub fn instance_does_not_exist() -> FailureResponse {
    FailureResponse::builder(INSTANCE_DOESNT_EXIST_MSG, StatusCode::GONE, INSTANCE_MISSING_ERROR_KEY)
        .with_empty_response()
        .build()
}

pub fn instance_limit_met() -> FailureResponse {
    FailureResponse::new(
        SERVICE_LIMIT_REACHED_MSG,
        StatusCode::INTERNAL_SERVER_ERROR,
        INSTANCE_LIMIT_REACHED_ERROR_KEY,
    )
}

pub fn binding_already_exists() -> FailureResponse {
    FailureResponse::new(BINDING_EXISTS_MSG, StatusCode::CONFLICT, BINDING_ALREADY_EXISTS_ERROR_KEY)
}

pub fn binding_does_not_exist() -> FailureResponse {
    FailureResponse::builder(BINDING_DOESNT_EXIST_MSG, StatusCode::GONE, BINDING_MISSING_ERROR_KEY)
        .with_empty_response()
        .build()
}

pub fn binding_not_found() -> FailureResponse {
    FailureResponse::builder(BINDING_NOT_FOUND_MSG, StatusCode::NOT_FOUND, BINDING_NOT_FOUND_ERROR_KEY)
        .with_empty_response()
        .build()
}

pub fn async_required() -> FailureResponse {
    FailureResponse::builder(ASYNC_REQUIRED_MSG, StatusCode::UNPROCESSABLE_ENTITY, ASYNC_REQUIRED_KEY)
        .with_error_key("AsyncRequired")
        .build()
}

pub fn plan_change_not_supported() -> FailureResponse {
    FailureResponse::builder(
        PLAN_CHANGE_UNSUPPORTED_MSG,
        StatusCode::UNPROCESSABLE_ENTITY,
        PLAN_CHANGE_NOT_SUPPORTED_KEY,
    )
    .with_error_key("PlanChangeNotSupported")
    .build()
}

pub fn raw_params_invalid() -> FailureResponse {
    FailureResponse::new(RAW_INVALID_PARAMS_MSG, StatusCode::UNPROCESSABLE_ENTITY, INVALID_RAW_PARAMS_KEY)
}

pub fn app_guid_not_provided() -> FailureResponse {
    FailureResponse::new(
        APP_GUID_MISSING_MSG,
        StatusCode::UNPROCESSABLE_ENTITY,
        APP_GUID_NOT_PROVIDED_ERROR_KEY,
    )
}

pub fn concurrent_instance_access() -> FailureResponse {
    FailureResponse::builder(
        CONCURRENT_INSTANCE_ACCESS_MSG,
        StatusCode::UNPROCESSABLE_ENTITY,
        CONCURRENT_ACCESS_KEY,
    )
    .with_error_key("ConcurrencyError")
    .build()
}

pub fn maintenance_info_conflict() -> FailureResponse {
    FailureResponse::builder(
        MAINTENANCE_INFO_CONFLICT_MSG,
        StatusCode::UNPROCESSABLE_ENTITY,
        MAINTENANCE_INFO_CONFLICT_KEY,
    )
    .with_error_key("MaintenanceInfoConflict")
    .build()
}

pub fn maintenance_info_nil_conflict() -> FailureResponse {
    FailureResponse::builder(
        MAINTENANCE_INFO_NIL_CONFLICT_MSG,
        StatusCode::UNPROCESSABLE_ENTITY,
        MAINTENANCE_INFO_CONFLICT_KEY,
    )
    .with_error_key("MaintenanceInfoConflict")
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::apiresponses::failure::FailureBody;
    use crate::domain::apiresponses::responses::{EmptyResponse, ErrorResponse};

    #[test]
    fn test_missing_resources_have_empty_bodies() {
        for failure in [instance_does_not_exist(), binding_does_not_exist(), binding_not_found()] {
            assert_eq!(failure.error_response(), FailureBody::Empty(EmptyResponse {}));
        }
        assert_eq!(instance_does_not_exist().status_code(), StatusCode::GONE);
        assert_eq!(binding_not_found().status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_async_required_exposes_error_key() {
        let failure = async_required();
        assert_eq!(failure.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(failure.logger_action(), "async-required");
        assert_eq!(
            failure.error_response(),
            FailureBody::Error(ErrorResponse {
                error: Some("AsyncRequired".into()),
                description: ASYNC_REQUIRED_MSG.into(),
            })
        );
    }

    #[test]
    fn test_maintenance_conflicts_share_key() {
        let mismatch = maintenance_info_conflict();
        let missing = maintenance_info_nil_conflict();
        assert_eq!(mismatch.logger_action(), missing.logger_action());
        assert_ne!(mismatch.to_string(), missing.to_string());
    }
}
