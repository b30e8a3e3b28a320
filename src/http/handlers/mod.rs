//! One handler per protocol operation.
//!
//! Every handler follows the same shape:
//! 1. parse path, query and body into the operation's details
//! 2. negotiate (version gates, required fields)
//! 3. call the backend with the request context
//! 4. map the result to the operation's envelope, or answer the failure
//!
//! Handlers run inside a span named after the operation and carrying the
//! instance/binding ids and the correlation id.

pub mod bind;
pub mod catalog;
pub mod deprovision;
pub mod fallback;
pub mod get_binding;
pub mod get_instance;
pub mod last_binding_operation;
pub mod last_operation;
pub mod provision;
pub mod unbind;
pub mod update;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::http::context::RequestContext;
use crate::http::negotiation::NegotiationError;
use crate::http::version::{ApiVersion, ApiVersionError};

pub use bind::bind;
pub use catalog::catalog;
pub use deprovision::deprovision;
pub use fallback::{method_not_allowed, route_not_found};
pub use get_binding::get_binding;
pub use get_instance::get_instance;
pub use last_binding_operation::last_binding_operation;
pub use last_operation::last_operation;
pub use provision::provision;
pub use unbind::unbind;
pub use update::update;

/// Query parameters any operation may receive. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OperationQuery {
    pub service_id: String,
    pub plan_id: String,
    pub accepts_incomplete: String,
    pub force: String,
    pub operation: String,
}

impl OperationQuery {
    /// The caller accepts a 202 and will poll the last operation.
    pub fn accepts_incomplete(&self) -> bool {
        self.accepts_incomplete == "true"
    }

    pub fn force(&self) -> bool {
        self.force == "true"
    }
}

pub(crate) type InstancePath = Result<Path<String>, PathRejection>;
pub(crate) type BindingPath = Result<Path<(String, String)>, PathRejection>;
pub(crate) type QueryInput = Result<Query<OperationQuery>, QueryRejection>;
pub(crate) type BodyInput = Result<Bytes, BytesRejection>;

pub(crate) fn parse_path<T>(path: Result<Path<T>, PathRejection>) -> Result<T, NegotiationError> {
    path.map(|Path(ids)| ids)
        .map_err(|rejection| NegotiationError::InvalidPath(rejection.body_text()))
}

pub(crate) fn parse_query(query: QueryInput) -> Result<OperationQuery, NegotiationError> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| NegotiationError::InvalidQuery(rejection.body_text()))
}

/// Decode a JSON request body into the operation's details.
pub(crate) fn decode_details<T: DeserializeOwned>(body: BodyInput) -> Result<T, NegotiationError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            NegotiationError::BodyTooLarge(rejection.body_text())
        } else {
            NegotiationError::InvalidDetails(rejection.body_text())
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|e| NegotiationError::InvalidDetails(e.to_string()))
}

/// The version the middleware negotiated for this request.
pub(crate) fn api_version(ctx: &RequestContext) -> Result<ApiVersion, NegotiationError> {
    ctx.api_version()
        .ok_or(NegotiationError::ApiVersion(ApiVersionError::Missing))
}
