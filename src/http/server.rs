//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with one route per protocol operation
//! - Answer unknown paths (404) and unsupported methods (405) with a JSON body
//! - Wire up middleware (request id, tracing, request context, API version)
//! - Serve on a listener until shutdown is signalled
//!
//! # Layer order (outermost first)
//! ```text
//! SetRequestId → TraceLayer → PropagateRequestId → body limit
//!     → request_context_middleware → api_version_middleware → handler
//! ```

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::BrokerConfig;
use crate::domain::broker::ServiceBroker;
use crate::http::handlers;
use crate::http::middleware::{api_version_middleware, request_context_middleware};
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<dyn ServiceBroker>,
}

/// Build the protocol router around `broker`.
pub fn router(broker: Arc<dyn ServiceBroker>, config: &BrokerConfig) -> Router {
    let state = AppState { broker };

    Router::new()
        .route("/v2/catalog", get(handlers::catalog))
        .route(
            "/v2/service_instances/{instance_id}",
            get(handlers::get_instance)
                .put(handlers::provision)
                .patch(handlers::update)
                .delete(handlers::deprovision),
        )
        .route(
            "/v2/service_instances/{instance_id}/last_operation",
            get(handlers::last_operation),
        )
        .route(
            "/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
            get(handlers::get_binding)
                .put(handlers::bind)
                .delete(handlers::unbind),
        )
        .route(
            "/v2/service_instances/{instance_id}/service_bindings/{binding_id}/last_operation",
            get(handlers::last_binding_operation),
        )
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(middleware::from_fn(api_version_middleware))
        .layer(middleware::from_fn(request_context_middleware))
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// HTTP server for the broker API.
pub struct BrokerServer {
    router: Router,
    config: BrokerConfig,
}

impl BrokerServer {
    pub fn new(config: BrokerConfig, broker: Arc<dyn ServiceBroker>) -> Self {
        let router = router(broker, &config);
        Self { router, config }
    }

    /// The router, for serving it elsewhere or driving it in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.triggered().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
