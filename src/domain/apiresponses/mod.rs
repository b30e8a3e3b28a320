//! Response bodies and the structured failure model.

pub mod errors;
pub mod failure;
pub mod responses;

pub use failure::{FailureBody, FailureResponse, FailureResponseBuilder};
pub use responses::{
    AsyncBindResponse, BindingResponse, CatalogResponse, DeprovisionResponse, EmptyResponse,
    ErrorResponse, GetBindingResponse, GetInstanceResponse, LastOperationResponse,
    ProvisioningResponse, UnbindResponse, UpdateResponse,
};
