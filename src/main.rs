//! Open Service Broker API server.
//!
//! ```text
//!     Platform (CF, Kubernetes)
//!          │  X-Broker-API-Version: 2.x
//!          ▼
//!   ┌───────────────────────────────────────────────────────┐
//!   │  tower-http layers (request id, trace)                 │
//!   │  request context → API version check                   │
//!   │  handlers (negotiate → ServiceBroker → respond)        │
//!   └───────────────────────────────────────────────────────┘
//!          │
//!          ▼
//!   CatalogBroker (static catalog from config, 501 otherwise)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use service_broker_api::config::{load_config, BrokerConfig};
use service_broker_api::lifecycle::Shutdown;
use service_broker_api::observability::{init_logging, init_metrics};
use service_broker_api::{BrokerServer, CatalogBroker};

#[derive(Parser)]
#[command(name = "service-broker")]
#[command(about = "Open Service Broker API server", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BrokerConfig::default(),
    };

    init_logging(&config.observability)?;
    tracing::info!("service-broker v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        services = config.catalog.services.len(),
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let broker = Arc::new(CatalogBroker::new(config.catalog.services.clone()));
    let server = BrokerServer::new(config, broker);

    let shutdown = Shutdown::new();
    let server_task = tokio::spawn(server.run(listener, shutdown.signal()));

    shutdown.trigger_on_termination().await?;
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
