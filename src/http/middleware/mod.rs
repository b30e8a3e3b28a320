//! Router middleware.
//!
//! Applied outermost first: request id (tower-http) → request context →
//! API version check → handler.

pub mod api_version;
pub mod request_context;

pub use api_version::api_version_middleware;
pub use request_context::request_context_middleware;
