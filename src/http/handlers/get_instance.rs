//! `GET /v2/service_instances/{instance_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{api_version, parse_path, parse_query, InstancePath, QueryInput};
use crate::domain::apiresponses::GetInstanceResponse;
use crate::domain::details::FetchInstanceDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::{require_instance_id, require_version};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;
use crate::http::version::ApiVersion;

const GET_INSTANCE_LOG_KEY: &str = "getInstance";

pub async fn get_instance(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: InstancePath,
    query: QueryInput,
) -> Response {
    let path = parse_path(path);
    let span = tracing::info_span!(
        "get_instance",
        instance_id = path.as_deref().unwrap_or_default(),
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(GET_INSTANCE_LOG_KEY, &ctx);
        let result = match path {
            Ok(instance_id) => fetch_instance(&state, &ctx, &instance_id, query, &responder).await,
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn fetch_instance(
    state: &AppState,
    ctx: &RequestContext,
    instance_id: &str,
    query: QueryInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_version(api_version(ctx)?, ApiVersion::V2_14, "get instance")?;
    require_instance_id(instance_id)?;
    let query = parse_query(query)?;
    let details = FetchInstanceDetails {
        service_id: query.service_id,
        plan_id: query.plan_id,
    };

    let instance = state.broker.get_instance(ctx, instance_id, details).await?;

    Ok(responder.respond(
        StatusCode::OK,
        &GetInstanceResponse {
            service_id: instance.service_id,
            plan_id: instance.plan_id,
            dashboard_url: instance.dashboard_url,
            parameters: instance.parameters,
            metadata: instance.metadata.into_option(),
        },
    ))
}
