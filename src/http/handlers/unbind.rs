//! `DELETE /v2/service_instances/{instance_id}/service_bindings/{binding_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{parse_path, parse_query, BindingPath, QueryInput};
use crate::domain::apiresponses::{EmptyResponse, UnbindResponse};
use crate::domain::details::UnbindDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::{require_binding_id, require_instance_id, require_service_and_plan};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;

const UNBIND_LOG_KEY: &str = "unbind";

pub async fn unbind(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: BindingPath,
    query: QueryInput,
) -> Response {
    let path = parse_path(path);
    let (instance_id, binding_id) = path
        .as_ref()
        .map_or(("", ""), |(instance_id, binding_id)| {
            (instance_id.as_str(), binding_id.as_str())
        });
    let span = tracing::info_span!(
        "unbind",
        instance_id,
        binding_id,
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(UNBIND_LOG_KEY, &ctx);
        let result = match path {
            Ok((instance_id, binding_id)) => {
                remove_binding(&state, &ctx, &instance_id, &binding_id, query, &responder).await
            }
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn remove_binding(
    state: &AppState,
    ctx: &RequestContext,
    instance_id: &str,
    binding_id: &str,
    query: QueryInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_instance_id(instance_id)?;
    require_binding_id(binding_id)?;
    let query = parse_query(query)?;
    let details = UnbindDetails {
        plan_id: query.plan_id.clone(),
        service_id: query.service_id.clone(),
    };
    require_service_and_plan(&details.service_id, &details.plan_id)?;

    let spec = state
        .broker
        .unbind(ctx, instance_id, binding_id, details, query.accepts_incomplete())
        .await?;

    if spec.is_async {
        Ok(responder.respond(
            StatusCode::ACCEPTED,
            &UnbindResponse {
                operation_data: spec.operation_data,
            },
        ))
    } else {
        Ok(responder.respond(StatusCode::OK, &EmptyResponse {}))
    }
}
