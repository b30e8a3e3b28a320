//! Answers for requests no protocol route accepts.

use axum::{
    extract::Request,
    http::StatusCode,
    response::Response,
};

use crate::domain::apiresponses::ErrorResponse;
use crate::http::context::RequestContext;
use crate::http::response::Responder;

const ROUTE_NOT_FOUND_LOG_KEY: &str = "routeNotFound";
const METHOD_NOT_ALLOWED_LOG_KEY: &str = "methodNotAllowed";

/// Unknown path.
pub async fn route_not_found(req: Request) -> Response {
    reject(
        ROUTE_NOT_FOUND_LOG_KEY,
        StatusCode::NOT_FOUND,
        &req,
        format!("no route for {}", req.uri().path()),
    )
}

/// Known path, unsupported method.
pub async fn method_not_allowed(req: Request) -> Response {
    reject(
        METHOD_NOT_ALLOWED_LOG_KEY,
        StatusCode::METHOD_NOT_ALLOWED,
        &req,
        format!("method {} not allowed on {}", req.method(), req.uri().path()),
    )
}

fn reject(
    operation: &'static str,
    status: StatusCode,
    req: &Request,
    description: String,
) -> Response {
    let ctx = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();
    let span = tracing::info_span!(
        "fallback",
        correlation_id = ctx.correlation_id().unwrap_or_default(),
        method = %req.method(),
        path = %req.uri().path()
    );
    span.in_scope(|| {
        Responder::new(operation, &ctx).respond(status, &ErrorResponse::new(description))
    })
}
