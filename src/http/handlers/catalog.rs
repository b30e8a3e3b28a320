//! `GET /v2/catalog`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use crate::domain::apiresponses::CatalogResponse;
use crate::http::context::RequestContext;
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;

const CATALOG_LOG_KEY: &str = "catalog";

pub async fn catalog(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    let span = tracing::info_span!(
        "catalog",
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(CATALOG_LOG_KEY, &ctx);
        let result = fetch_catalog(&state, &ctx, &responder).await;
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn fetch_catalog(
    state: &AppState,
    ctx: &RequestContext,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    let services = state.broker.services(ctx).await?;
    Ok(responder.respond(StatusCode::OK, &CatalogResponse { services }))
}
