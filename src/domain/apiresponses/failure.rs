//! Structured failures a backend returns to control the error response.
//!
//! A [`FailureResponse`] carries the underlying cause, the HTTP status the
//! backend wants the platform to see, and a logger action used to correlate
//! log lines with the failure. The body is either the cause's description,
//! the description plus a public error key, or nothing at all.

use std::error::Error as StdError;
use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::Span;

use crate::domain::apiresponses::responses::{EmptyResponse, ErrorResponse};

/// Shared, immutable cause of a failure.
pub type Cause = Arc<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Presentation {
    Description,
    ErrorKey(String),
    Empty,
}

/// A failure whose status code and body shape are chosen by the backend.
#[derive(Debug, Clone, Error)]
#[error("{cause}")]
pub struct FailureResponse {
    cause: Cause,
    status_code: StatusCode,
    logger_action: String,
    presentation: Presentation,
}

impl FailureResponse {
    /// A failure whose body carries the cause's message as description.
    pub fn new(
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
        status_code: StatusCode,
        logger_action: impl Into<String>,
    ) -> Self {
        FailureResponseBuilder::new(cause, status_code, logger_action).build()
    }

    pub fn builder(
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
        status_code: StatusCode,
        logger_action: impl Into<String>,
    ) -> FailureResponseBuilder {
        FailureResponseBuilder::new(cause, status_code, logger_action)
    }

    /// Body to send for this failure.
    pub fn error_response(&self) -> FailureBody {
        match &self.presentation {
            Presentation::Empty => FailureBody::Empty(EmptyResponse {}),
            Presentation::ErrorKey(key) => FailureBody::Error(ErrorResponse {
                error: Some(key.clone()),
                description: self.cause.to_string(),
            }),
            Presentation::Description => FailureBody::Error(ErrorResponse {
                error: None,
                description: self.cause.to_string(),
            }),
        }
    }

    /// The status code to respond with.
    ///
    /// Codes outside 4xx/5xx are replaced by 500. When `logger` is given the
    /// replacement is reported as a warning within that span.
    pub fn validated_status_code(&self, logger: Option<&Span>) -> StatusCode {
        let code = self.status_code.as_u16();
        if (400..=599).contains(&code) {
            return self.status_code;
        }

        if let Some(span) = logger {
            tracing::warn!(
                parent: span,
                status_code = code,
                "Invalid failure http response code: {}, expected 4xx or 5xx, returning internal server error: 500.",
                code
            );
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Copy of this failure with `extra` appended to the description.
    pub fn append_error_message(&self, extra: &str) -> FailureResponse {
        let message: Box<dyn StdError + Send + Sync> = format!("{} {}", self.cause, extra).into();
        FailureResponse {
            cause: Cause::from(message),
            status_code: self.status_code,
            logger_action: self.logger_action.clone(),
            presentation: self.presentation.clone(),
        }
    }

    pub fn logger_action(&self) -> &str {
        &self.logger_action
    }

    /// Status code as constructed, before validation.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }
}

/// Accumulates the optional parts of a [`FailureResponse`].
///
/// The error key and the empty body are alternative presentations; whichever
/// is requested last is the one built.
#[derive(Debug)]
pub struct FailureResponseBuilder {
    cause: Cause,
    status_code: StatusCode,
    logger_action: String,
    presentation: Presentation,
}

impl FailureResponseBuilder {
    pub fn new(
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
        status_code: StatusCode,
        logger_action: impl Into<String>,
    ) -> Self {
        Self {
            cause: Cause::from(cause.into()),
            status_code,
            logger_action: logger_action.into(),
            presentation: Presentation::Description,
        }
    }

    /// Show `key` as the public `error` code next to the description.
    pub fn with_error_key(mut self, key: impl Into<String>) -> Self {
        self.presentation = Presentation::ErrorKey(key.into());
        self
    }

    /// Respond with an empty JSON object regardless of the cause.
    pub fn with_empty_response(mut self) -> Self {
        self.presentation = Presentation::Empty;
        self
    }

    pub fn build(self) -> FailureResponse {
        FailureResponse {
            cause: self.cause,
            status_code: self.status_code,
            logger_action: self.logger_action,
            presentation: self.presentation,
        }
    }
}

/// Body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FailureBody {
    Error(ErrorResponse),
    Empty(EmptyResponse),
}
