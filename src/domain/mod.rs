//! Protocol domain model.
//!
//! # Data Flow
//! ```text
//! request (path, query, body)
//!     → details.rs (OperationDetails handed to the backend)
//!     → broker.rs (ServiceBroker capability, BrokerError)
//!     → specs.rs (backend results)
//!     → apiresponses (envelopes / FailureResponse bodies)
//! ```
//!
//! service.rs holds the catalog model shared by all of the above.

pub mod apiresponses;
pub mod broker;
pub mod details;
pub mod service;
pub mod specs;

pub use broker::{BrokerError, BrokerResult, ServiceBroker};
pub use details::{
    BindDetails, BindResource, DeprovisionDetails, FetchBindingDetails, FetchInstanceDetails,
    PollDetails, PreviousValues, ProvisionDetails, UnbindDetails, UpdateDetails,
};
pub use service::{MaintenanceInfo, Service, ServicePlan};
pub use specs::{
    Binding, BindingMetadata, DeprovisionServiceSpec, Endpoint, GetBindingSpec,
    GetInstanceDetailsSpec, InstanceMetadata, LastOperation, LastOperationState,
    ProvisionedServiceSpec, UnbindSpec, UpdateServiceSpec, VolumeMount,
};
