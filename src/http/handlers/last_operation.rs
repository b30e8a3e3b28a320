//! `GET /v2/service_instances/{instance_id}/last_operation`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{parse_path, parse_query, InstancePath, QueryInput};
use crate::domain::apiresponses::LastOperationResponse;
use crate::domain::details::PollDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::require_instance_id;
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;

const LAST_OPERATION_LOG_KEY: &str = "lastOperation";

pub async fn last_operation(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: InstancePath,
    query: QueryInput,
) -> Response {
    let path = parse_path(path);
    let span = tracing::info_span!(
        "last_operation",
        instance_id = path.as_deref().unwrap_or_default(),
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(LAST_OPERATION_LOG_KEY, &ctx);
        let result = match path {
            Ok(instance_id) => poll_instance(&state, &ctx, &instance_id, query, &responder).await,
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn poll_instance(
    state: &AppState,
    ctx: &RequestContext,
    instance_id: &str,
    query: QueryInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_instance_id(instance_id)?;
    let query = parse_query(query)?;
    let details = PollDetails {
        service_id: query.service_id,
        plan_id: query.plan_id,
        operation_data: query.operation,
    };

    let last_operation = state.broker.last_operation(ctx, instance_id, details).await?;
    tracing::debug!(state = %last_operation.state, "Polled last operation");

    Ok(responder.respond(
        StatusCode::OK,
        &LastOperationResponse {
            state: last_operation.state,
            description: last_operation.description,
        },
    ))
}
