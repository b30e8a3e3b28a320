//! Metrics collection and exposition.
//!
//! # Metrics
//! - `broker_requests_total` (counter): responses by operation and status
//! - `broker_request_duration_seconds` (histogram): latency by operation
//!
//! Recording is a no-op until a recorder is installed, so handlers record
//! unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "broker_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "broker_request_duration_seconds";

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one response of `operation`.
pub fn record_request(operation: &'static str, status: u16, started: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}
