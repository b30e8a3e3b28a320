//! `PATCH /v2/service_instances/{instance_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{decode_details, parse_path, parse_query, BodyInput, InstancePath, QueryInput};
use crate::domain::apiresponses::UpdateResponse;
use crate::domain::details::UpdateDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::{
    check_maintenance_info, require_instance_id, require_service_id, resolve_catalog_entry,
};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;

const UPDATE_LOG_KEY: &str = "update";

pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: InstancePath,
    query: QueryInput,
    body: BodyInput,
) -> Response {
    let path = parse_path(path);
    let span = tracing::info_span!(
        "update",
        instance_id = path.as_deref().unwrap_or_default(),
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(UPDATE_LOG_KEY, &ctx);
        let result = match path {
            Ok(instance_id) => {
                update_instance(&state, ctx, &instance_id, query, body, &responder).await
            }
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn update_instance(
    state: &AppState,
    ctx: RequestContext,
    instance_id: &str,
    query: QueryInput,
    body: BodyInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_instance_id(instance_id)?;
    let query = parse_query(query)?;
    let details: UpdateDetails = decode_details(body)?;
    require_service_id(&details.service_id)?;

    // Maintenance info is checked against the target plan, which is the
    // current one when the update does not change plans.
    let mut ctx = ctx;
    if details.maintenance_info.is_some() {
        let plan_id = if details.plan_id.is_empty() {
            details.previous_values.plan_id.as_str()
        } else {
            details.plan_id.as_str()
        };
        let services = state.broker.services(&ctx).await?;
        let (service, plan) = resolve_catalog_entry(services, &details.service_id, plan_id)?;
        check_maintenance_info(details.maintenance_info.as_ref(), &plan)?;
        ctx = ctx.attach(Some(service)).attach(Some(plan));
    }

    let async_allowed = query.accepts_incomplete();
    let spec = state
        .broker
        .update(&ctx, instance_id, details, async_allowed)
        .await?;

    let status = if spec.is_async {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    Ok(responder.respond(
        status,
        &UpdateResponse {
            dashboard_url: spec.dashboard_url,
            operation_data: spec.operation_data,
            metadata: spec.metadata.into_option(),
        },
    ))
}
