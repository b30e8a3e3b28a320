//! A broker that only advertises a static catalog.
//!
//! Backs the `service-broker` binary: the catalog comes from configuration
//! and every resource operation answers `501 Not Implemented`, so a platform
//! can register the broker and inspect its offerings before a real backend
//! exists.

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::domain::apiresponses::FailureResponse;
use crate::domain::broker::{BrokerError, BrokerResult, ServiceBroker};
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

pub const NOT_IMPLEMENTED_KEY: &str = "not-implemented";

#[derive(Debug, Clone, Default)]
pub struct CatalogBroker {
    services: Vec<Service>,
}

impl CatalogBroker {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }
}

fn not_implemented(operation: &str) -> BrokerError {
    FailureResponse::new(
        format!("{operation} is not supported by this broker"),
        StatusCode::NOT_IMPLEMENTED,
        NOT_IMPLEMENTED_KEY,
    )
    .into()
}

#[async_trait]
impl ServiceBroker for CatalogBroker {
    async fn services(&self, _ctx: &RequestContext) -> BrokerResult<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn provision(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _details: ProvisionDetails,
        _async_allowed: bool,
    ) -> BrokerResult<ProvisionedServiceSpec> {
        Err(not_implemented("provision"))
    }

    async fn deprovision(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _details: DeprovisionDetails,
        _async_allowed: bool,
    ) -> BrokerResult<DeprovisionServiceSpec> {
        Err(not_implemented("deprovision"))
    }

    async fn get_instance(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _details: FetchInstanceDetails,
    ) -> BrokerResult<GetInstanceDetailsSpec> {
        Err(not_implemented("get instance"))
    }

    async fn update(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _details: UpdateDetails,
        _async_allowed: bool,
    ) -> BrokerResult<UpdateServiceSpec> {
        Err(not_implemented("update"))
    }

    async fn last_operation(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _details: PollDetails,
    ) -> BrokerResult<LastOperation> {
        Err(not_implemented("last operation"))
    }

    async fn bind(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        _details: BindDetails,
        _async_allowed: bool,
    ) -> BrokerResult<Binding> {
        Err(not_implemented("bind"))
    }

    async fn unbind(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        _details: UnbindDetails,
        _async_allowed: bool,
    ) -> BrokerResult<UnbindSpec> {
        Err(not_implemented("unbind"))
    }

    async fn get_binding(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        _details: FetchBindingDetails,
    ) -> BrokerResult<GetBindingSpec> {
        Err(not_implemented("get binding"))
    }

    async fn last_binding_operation(
        &self,
        _ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        _details: PollDetails,
    ) -> BrokerResult<LastOperation> {
        Err(not_implemented("last binding operation"))
    }
}
