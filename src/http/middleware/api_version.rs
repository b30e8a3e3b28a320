//! API version middleware.
//! Rejects requests without a usable `X-Broker-API-Version` before routing
//! reaches a handler.

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::context::RequestContext;
use crate::http::negotiation::NegotiationError;
use crate::http::response::Responder;
use crate::http::version::{negotiate, X_BROKER_API_VERSION};

const OPERATION: &str = "api-version";

pub async fn api_version_middleware(mut req: Request<Body>, next: Next) -> Response {
    let ctx = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let header = req
        .headers()
        .get(X_BROKER_API_VERSION)
        .map(|value| value.to_str().unwrap_or_default());

    match negotiate(header) {
        Ok(version) => {
            req.extensions_mut().insert(ctx.attach(Some(version)));
            next.run(req).await
        }
        Err(err) => {
            let span = tracing::info_span!(
                "api_version",
                correlation_id = ctx.correlation_id().unwrap_or_default(),
                path = %req.uri().path()
            );
            span.in_scope(|| {
                Responder::new(OPERATION, &ctx).negotiation_failed(NegotiationError::from(err))
            })
        }
    }
}
