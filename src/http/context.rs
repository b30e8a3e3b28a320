//! Request-scoped context handed to the backend.
//!
//! A [`RequestContext`] is built once per request by middleware and carries
//! values that were already resolved while handling it (correlation id,
//! request identity, API version, and the catalog service/plan a handler
//! validated against) so the backend does not have to look them up again.
//!
//! Entries are keyed by type. A context never changes once built; attaching
//! a value yields a new context and the original stays valid.

use axum::http::Extensions;

use crate::domain::service::{Service, ServicePlan};
use crate::http::version::ApiVersion;

/// Marker for types that may be stored in a [`RequestContext`].
pub trait ContextEntry: Clone + Send + Sync + 'static {}

/// Correlation id of the request, taken from the caller or generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

/// Value of `X-Broker-API-Request-Identity`, echoed on the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity(pub String);

/// Value of `X-Broker-API-Originating-Identity`: `<platform> <base64 value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginatingIdentity {
    pub platform: String,
    pub value: String,
}

impl OriginatingIdentity {
    /// Split the raw header; `None` when it lacks either part.
    pub fn parse(raw: &str) -> Option<Self> {
        let (platform, value) = raw.trim().split_once(' ')?;
        let value = value.trim();
        if platform.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            platform: platform.to_string(),
            value: value.to_string(),
        })
    }
}

impl ContextEntry for CorrelationId {}
impl ContextEntry for RequestIdentity {}
impl ContextEntry for OriginatingIdentity {}
impl ContextEntry for ApiVersion {}
impl ContextEntry for Service {}
impl ContextEntry for ServicePlan {}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    entries: Extensions,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that also carries `value`. `None` returns an identical
    /// context.
    pub fn attach<T: ContextEntry>(&self, value: Option<T>) -> Self {
        match value {
            None => self.clone(),
            Some(value) => {
                let mut entries = self.entries.clone();
                entries.insert(value);
                Self { entries }
            }
        }
    }

    /// The stored value of type `T`, or `None` if it was never attached.
    pub fn retrieve<T: ContextEntry>(&self) -> Option<&T> {
        self.entries.get::<T>()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.retrieve::<CorrelationId>().map(|id| id.0.as_str())
    }

    pub fn request_identity(&self) -> Option<&str> {
        self.retrieve::<RequestIdentity>().map(|id| id.0.as_str())
    }

    pub fn originating_identity(&self) -> Option<&OriginatingIdentity> {
        self.retrieve::<OriginatingIdentity>()
    }

    pub fn api_version(&self) -> Option<ApiVersion> {
        self.retrieve::<ApiVersion>().copied()
    }

    pub fn service(&self) -> Option<&Service> {
        self.retrieve::<Service>()
    }

    pub fn service_plan(&self) -> Option<&ServicePlan> {
        self.retrieve::<ServicePlan>()
    }
}
