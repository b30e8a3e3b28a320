//! `GET /v2/service_instances/{instance_id}/service_bindings/{binding_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{api_version, parse_path, parse_query, BindingPath, QueryInput};
use crate::domain::apiresponses::{BindingResponse, GetBindingResponse};
use crate::domain::details::FetchBindingDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::{require_binding_id, require_instance_id, require_version};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;
use crate::http::version::ApiVersion;

const GET_BINDING_LOG_KEY: &str = "getBinding";

pub async fn get_binding(
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
        "get_binding",
        instance_id,
        binding_id,
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(GET_BINDING_LOG_KEY, &ctx);
        let result = match path {
            Ok((instance_id, binding_id)) => {
                fetch_binding(&state, &ctx, &instance_id, &binding_id, query, &responder).await
            }
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn fetch_binding(
    state: &AppState,
    ctx: &RequestContext,
    instance_id: &str,
    binding_id: &str,
    query: QueryInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_version(api_version(ctx)?, ApiVersion::V2_14, "get binding")?;
    require_instance_id(instance_id)?;
    require_binding_id(binding_id)?;
    let query = parse_query(query)?;
    let details = FetchBindingDetails {
        service_id: query.service_id,
        plan_id: query.plan_id,
    };

    let binding = state
        .broker
        .get_binding(ctx, instance_id, binding_id, details)
        .await?;

    Ok(responder.respond(
        StatusCode::OK,
        &GetBindingResponse {
            binding: BindingResponse {
                credentials: binding.credentials,
                syslog_drain_url: binding.syslog_drain_url,
                route_service_url: binding.route_service_url,
                volume_mounts: binding.volume_mounts,
                backup_agent_url: None,
                endpoints: binding.endpoints,
                metadata: binding.metadata.into_option(),
            },
            parameters: binding.parameters,
        },
    ))
}
