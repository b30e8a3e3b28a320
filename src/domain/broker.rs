//! The backend capability the protocol layer delegates to.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::apiresponses::FailureResponse;
use crate::domain::details::{
    BindDetails, DeprovisionDetails, FetchBindingDetails, FetchInstanceDetails, PollDetails,
    ProvisionDetails, UnbindDetails, UpdateDetails,
};
use crate::domain::service::Service;
use crate::domain::specs::{
    Binding, DeprovisionServiceSpec, GetBindingSpec, GetInstanceDetailsSpec, LastOperation,
    ProvisionedServiceSpec, UnbindSpec, UpdateServiceSpec,
};
use crate::http::context::RequestContext;

/// Errors a backend can return.
///
/// `Failure` lets the backend pick the status code and body; anything else
/// is reported to the platform as a 500.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error(transparent)]
    Failure(#[from] FailureResponse),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl BrokerError {
    /// Wrap an error the backend did not classify.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        BrokerError::Other(err.into())
    }
}

/// Result type for backend operations.
pub type BrokerResult<T> = Result<T, BrokerError>;

/// Resource-management operations implemented by the broker author.
///
/// One instance is shared by every request; implementations are responsible
/// for their own synchronisation.
#[async_trait]
pub trait ServiceBroker: Send + Sync {
    /// The catalog of services and plans.
    async fn services(&self, ctx: &RequestContext) -> BrokerResult<Vec<Service>>;

    async fn provision(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: ProvisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<ProvisionedServiceSpec>;

    async fn deprovision(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: DeprovisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<DeprovisionServiceSpec>;

    async fn get_instance(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: FetchInstanceDetails,
    ) -> BrokerResult<GetInstanceDetailsSpec>;

    async fn update(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: UpdateDetails,
        async_allowed: bool,
    ) -> BrokerResult<UpdateServiceSpec>;

    async fn last_operation(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation>;

    async fn bind(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: BindDetails,
        async_allowed: bool,
    ) -> BrokerResult<Binding>;

    async fn unbind(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: UnbindDetails,
        async_allowed: bool,
    ) -> BrokerResult<UnbindSpec>;

    async fn get_binding(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: FetchBindingDetails,
    ) -> BrokerResult<GetBindingSpec>;

    async fn last_binding_operation(
        &self,
        ctx: &RequestContext,
        instance_id: &str,
        binding_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation>;
}
