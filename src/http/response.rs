//! Response writing.
//!
//! # Responsibilities
//! - Serialize envelopes to JSON and set the status code
//! - Echo `X-Broker-API-Request-Identity`
//! - Map negotiation errors and backend failures to error bodies
//! - Emit one outcome log line and request metrics per response
//!
//! # Design Decisions
//! - Handlers produce exactly one [`Response`]; nothing is written after it
//! - Every failure path goes through [`Responder::finish`] so status code
//!   validation is applied uniformly

use std::time::Instant;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;
use thiserror::Error;
use tracing::Span;

use crate::domain::apiresponses::{ErrorResponse, FailureResponse};
use crate::domain::broker::BrokerError;
use crate::http::context::RequestContext;
use crate::http::negotiation::NegotiationError;
use crate::observability::metrics;

pub const X_BROKER_API_REQUEST_IDENTITY: &str = "x-broker-api-request-identity";

/// Logger action for backend errors that are not a [`FailureResponse`].
pub const UNKNOWN_ERROR_KEY: &str = "unknown-error";

/// Why a handler did not produce a success response.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl From<FailureResponse> for HandlerError {
    fn from(failure: FailureResponse) -> Self {
        HandlerError::Broker(BrokerError::Failure(failure))
    }
}

/// Writes the single response of one operation.
#[derive(Debug)]
pub struct Responder {
    operation: &'static str,
    request_identity: Option<HeaderValue>,
    started: Instant,
}

impl Responder {
    pub fn new(operation: &'static str, ctx: &RequestContext) -> Self {
        Self {
            operation,
            request_identity: ctx
                .request_identity()
                .and_then(|identity| HeaderValue::from_str(identity).ok()),
            started: Instant::now(),
        }
    }

    /// Serialize `body` and build the response.
    pub fn respond<T: Serialize>(&self, status: StatusCode, body: &T) -> Response {
        let mut response = match serde_json::to_vec(body) {
            Ok(bytes) => Response::new(Body::from(bytes)),
            Err(e) => {
                tracing::error!(
                    operation = self.operation,
                    status = status.as_u16(),
                    error = %e,
                    "encoding response"
                );
                Response::new(Body::empty())
            }
        };

        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(identity) = &self.request_identity {
            headers.insert(X_BROKER_API_REQUEST_IDENTITY, identity.clone());
        }

        metrics::record_request(self.operation, status.as_u16(), self.started);
        tracing::info!(
            operation = self.operation,
            status = status.as_u16(),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Responded"
        );

        response
    }

    /// Turn a handler result into the response, answering errors.
    pub fn finish(&self, result: Result<Response, HandlerError>) -> Response {
        match result {
            Ok(response) => response,
            Err(HandlerError::Negotiation(err)) => self.negotiation_failed(err),
            Err(HandlerError::Broker(err)) => self.backend_failed(err),
        }
    }

    pub fn negotiation_failed(&self, err: NegotiationError) -> Response {
        tracing::error!(action = err.logger_action(), error = %err, "Request rejected");
        self.respond(err.status_code(), &ErrorResponse::new(err.to_string()))
    }

    pub fn backend_failed(&self, err: BrokerError) -> Response {
        match err {
            BrokerError::Failure(failure) => {
                tracing::error!(action = failure.logger_action(), error = %failure, "Backend failure");
                let status = failure.validated_status_code(Some(&Span::current()));
                self.respond(status, &failure.error_response())
            }
            BrokerError::Other(err) => {
                tracing::error!(action = UNKNOWN_ERROR_KEY, error = %err, "Unclassified backend failure");
                self.respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponse::new(err.to_string()),
                )
            }
        }
    }
}
