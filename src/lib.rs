//! Open Service Broker API server library.
//!
//! Implement [`ServiceBroker`] for your backend and serve it with
//! [`BrokerServer`] (or mount [`http::router`] in your own Axum app). The
//! library takes care of the protocol: version negotiation, request
//! validation, response envelopes and the failure model.

// Protocol model
pub mod domain;
pub mod http;

// Bundled catalog-only backend
pub mod catalog;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use catalog::CatalogBroker;
pub use config::BrokerConfig;
pub use domain::apiresponses::FailureResponse;
pub use domain::broker::{BrokerError, BrokerResult, ServiceBroker};
pub use http::{BrokerServer, RequestContext};
pub use lifecycle::{Shutdown, ShutdownSignal};
