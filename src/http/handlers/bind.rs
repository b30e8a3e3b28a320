//! `PUT /v2/service_instances/{instance_id}/service_bindings/{binding_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{
    api_version, decode_details, parse_path, parse_query, BindingPath, BodyInput, QueryInput,
};
use crate::domain::apiresponses::{AsyncBindResponse, BindingResponse};
use crate::domain::details::BindDetails;
use crate::domain::specs::Binding;
use crate::http::context::RequestContext;
use crate::http::negotiation::{require_binding_id, require_instance_id, require_service_and_plan};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;
use crate::http::version::ApiVersion;

const BIND_LOG_KEY: &str = "bind";

pub async fn bind(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: BindingPath,
    query: QueryInput,
    body: BodyInput,
) -> Response {
    let path = parse_path(path);
    let (instance_id, binding_id) = path
        .as_ref()
        .map_or(("", ""), |(instance_id, binding_id)| {
            (instance_id.as_str(), binding_id.as_str())
        });
    let span = tracing::info_span!(
        "bind",
        instance_id,
        binding_id,
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(BIND_LOG_KEY, &ctx);
        let result = match path {
            Ok((instance_id, binding_id)) => {
                create_binding(
                    &state,
                    &ctx,
                    &instance_id,
                    &binding_id,
                    query,
                    body,
                    &responder,
                )
                .await
            }
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn create_binding(
    state: &AppState,
    ctx: &RequestContext,
    instance_id: &str,
    binding_id: &str,
    query: QueryInput,
    body: BodyInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    let version = api_version(ctx)?;
    require_instance_id(instance_id)?;
    require_binding_id(binding_id)?;
    let query = parse_query(query)?;
    let details: BindDetails = decode_details(body)?;
    require_service_and_plan(&details.service_id, &details.plan_id)?;

    // Asynchronous bindings were introduced with 2.14.
    let async_allowed = version.at_least(ApiVersion::V2_14) && query.accepts_incomplete();

    let binding = state
        .broker
        .bind(ctx, instance_id, binding_id, details, async_allowed)
        .await?;

    if binding.is_async && async_allowed {
        return Ok(responder.respond(
            StatusCode::ACCEPTED,
            &AsyncBindResponse {
                operation_data: binding.operation_data,
            },
        ));
    }

    let status = if binding.already_exists {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok(responder.respond(status, &binding_response(binding)))
}

pub(crate) fn binding_response(binding: Binding) -> BindingResponse {
    BindingResponse {
        credentials: binding.credentials,
        syslog_drain_url: binding.syslog_drain_url,
        route_service_url: binding.route_service_url,
        volume_mounts: binding.volume_mounts,
        backup_agent_url: binding.backup_agent_url,
        endpoints: binding.endpoints,
        metadata: binding.metadata.into_option(),
    }
}
