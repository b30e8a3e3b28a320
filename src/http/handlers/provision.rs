//! `PUT /v2/service_instances/{instance_id}`

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

use super::{decode_details, parse_path, parse_query, BodyInput, InstancePath, QueryInput};
use crate::domain::apiresponses::ProvisioningResponse;
use crate::domain::details::ProvisionDetails;
use crate::http::context::RequestContext;
use crate::http::negotiation::{
    check_maintenance_info, require_instance_id, require_service_and_plan, resolve_catalog_entry,
};
use crate::http::response::{HandlerError, Responder};
use crate::http::server::AppState;

const PROVISION_LOG_KEY: &str = "provision";

pub async fn provision(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    path: InstancePath,
    query: QueryInput,
    body: BodyInput,
) -> Response {
    let path = parse_path(path);
    let span = tracing::info_span!(
        "provision",
        instance_id = path.as_deref().unwrap_or_default(),
        correlation_id = ctx.correlation_id().unwrap_or_default()
    );

    async move {
        let responder = Responder::new(PROVISION_LOG_KEY, &ctx);
        let result = match path {
            Ok(instance_id) => {
                provision_instance(&state, ctx, &instance_id, query, body, &responder).await
            }
            Err(err) => Err(err.into()),
        };
        responder.finish(result)
    }
    .instrument(span)
    .await
}

async fn provision_instance(
    state: &AppState,
    ctx: RequestContext,
    instance_id: &str,
    query: QueryInput,
    body: BodyInput,
    responder: &Responder,
) -> Result<Response, HandlerError> {
    require_instance_id(instance_id)?;
    let query = parse_query(query)?;
    let details: ProvisionDetails = decode_details(body)?;
    require_service_and_plan(&details.service_id, &details.plan_id)?;

    let services = state.broker.services(&ctx).await?;
    let (service, plan) = resolve_catalog_entry(services, &details.service_id, &details.plan_id)?;
    check_maintenance_info(details.maintenance_info.as_ref(), &plan)?;
    let ctx = ctx.attach(Some(service)).attach(Some(plan));

    let async_allowed = query.accepts_incomplete();
    tracing::debug!(
        service_id = %details.service_id,
        plan_id = %details.plan_id,
        async_allowed,
        "Provisioning"
    );

    let spec = state
        .broker
        .provision(&ctx, instance_id, details, async_allowed)
        .await?;

    let metadata = spec.metadata.into_option();
    let response = if spec.already_exists {
        responder.respond(
            StatusCode::OK,
            &ProvisioningResponse {
                dashboard_url: spec.dashboard_url,
                operation_data: None,
                metadata,
            },
        )
    } else if spec.is_async {
        responder.respond(
            StatusCode::ACCEPTED,
            &ProvisioningResponse {
                dashboard_url: spec.dashboard_url,
                operation_data: spec.operation_data,
                metadata,
            },
        )
    } else {
        responder.respond(
            StatusCode::CREATED,
            &ProvisioningResponse {
                dashboard_url: spec.dashboard_url,
                operation_data: None,
                metadata,
            },
        )
    };
    Ok(response)
}
