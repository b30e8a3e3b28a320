//! `DELETE /v2/service_instances/{instance_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{parse_path, parse_query, InstancePath, QueryInput};
use crate::domain::apiresponses::{DeprovisionResponse, EmptyResponse};
use crate::domain::details::DeprovisionDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::{require_instance_id, require_service_and_plan};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;

const DEPROVISION_LOG_KEY: &str = "deprovision";

pub async fn deprovision(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: InstancePath,
    query: QueryInput,
) -> Response {
    let path = parse_path(path);
    let span = tracing::info_span!(
        "deprovision",
        instance_id = path.as_deref().unwrap_or_default(),
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(DEPROVISION_LOG_KEY, &ctx);
        let result = match path {
            Ok(instance_id) => {
                deprovision_instance(&state, &ctx, &instance_id, query, &responder).await
            }
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn deprovision_instance(
    state: &AppState,
    ctx: &RequestContext,
    instance_id: &str,
    query: QueryInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_instance_id(instance_id)?;
    let query = parse_query(query)?;
    let details = DeprovisionDetails {
        plan_id: query.plan_id.clone(),
        service_id: query.service_id.clone(),
        force: query.force(),
    };
    require_service_and_plan(&details.service_id, &details.plan_id)?;

    let spec = state
        .broker
        .deprovision(ctx, instance_id, details, query.accepts_incomplete())
        .await?;

    if spec.is_async {
        Ok(responder.respond(
            StatusCode::ACCEPTED,
            &DeprovisionResponse {
                operation_data: spec.operation_data,
            },
        ))
    } else {
        Ok(responder.respond(StatusCode::OK, &EmptyResponse {}))
    }
}
