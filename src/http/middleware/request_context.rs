//! Request context middleware.
//! Builds the [`RequestContext`] every handler receives.

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::http::context::{CorrelationId, OriginatingIdentity, RequestContext, RequestIdentity};
use crate::http::response::X_BROKER_API_REQUEST_IDENTITY;

pub const X_BROKER_API_ORIGINATING_IDENTITY: &str = "x-broker-api-originating-identity";

/// Headers a caller may carry its correlation id in, in order of preference.
pub const CORRELATION_ID_HEADERS: [&str; 5] = [
    "x-correlation-id",
    "x-correlationid",
    "x-forrequest-id",
    "x-request-id",
    "x-vcap-request-id",
];

pub async fn request_context_middleware(mut req: Request<Body>, next: Next) -> Response {
    let ctx = context_from_headers(req.headers());
    tracing::debug!(
        correlation_id = ctx.correlation_id().unwrap_or_default(),
        method = %req.method(),
        path = %req.uri().path(),
        "Request received"
    );
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

pub fn context_from_headers(headers: &HeaderMap) -> RequestContext {
    let correlation_id = CORRELATION_ID_HEADERS
        .iter()
        .find_map(|name| header_str(headers, name))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let request_identity = header_str(headers, X_BROKER_API_REQUEST_IDENTITY)
        .map(|identity| RequestIdentity(identity.to_string()));

    let originating_identity =
        header_str(headers, X_BROKER_API_ORIGINATING_IDENTITY).and_then(OriginatingIdentity::parse);

    RequestContext::new()
        .attach(Some(CorrelationId(correlation_id)))
        .attach(request_identity)
        .attach(originating_identity)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
