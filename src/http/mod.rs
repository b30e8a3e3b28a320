//! Open Service Broker HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, tower-http layers)
//!     → middleware/request_context.rs (correlation id, identities)
//!     → middleware/api_version.rs (X-Broker-API-Version, 412 on failure)
//!     → handlers/* (negotiation.rs checks, backend call)
//!     → response.rs (envelope, status validation, identity echo)
//!     → Send to client
//! ```

pub mod context;
pub mod handlers;
pub mod middleware;
pub mod negotiation;
pub mod response;
pub mod server;
pub mod version;

pub use context::RequestContext;
pub use server::{router, AppState, BrokerServer};
pub use version::{ApiVersion, X_BROKER_API_VERSION};
