//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use service_broker_api::config::BrokerConfig;
use service_broker_api::domain::details::{
    BindDetails, DeprovisionDetails, FetchBindingDetails, FetchInstanceDetails, PollDetails,
    ProvisionDetails, UnbindDetails, UpdateDetails,
};
use service_broker_api::domain::service::{MaintenanceInfo, Service, ServicePlan};
use service_broker_api::domain::specs::{
    Binding, DeprovisionServiceSpec, GetBindingSpec, GetInstanceDetailsSpec, LastOperation,
    LastOperationState, ProvisionedServiceSpec, UnbindSpec, UpdateServiceSpec,
};
use service_broker_api::http::router;
use service_broker_api::{BrokerError, BrokerResult, FailureResponse, RequestContext, ServiceBroker};

pub const SERVICE_ID: &str = "svc-1";
pub const PLAN_ID: &str = "plan-1";
pub const MAINTAINED_PLAN_ID: &str = "plan-maintained";

/// What a fake operation answers.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Ok(T),
    Failure(FailureResponse),
    Error(String),
}

impl<T: Clone> Outcome<T> {
    fn result(&self) -> BrokerResult<T> {
        match self {
            Outcome::Ok(value) => Ok(value.clone()),
            Outcome::Failure(failure) => Err(failure.clone().into()),
            Outcome::Error(message) => Err(BrokerError::other(message.clone())),
        }
    }
}

/// Arguments of the latest backend call.
#[derive(Debug, Clone)]
pub enum Call {
    Provision(ProvisionDetails, bool),
    Deprovision(DeprovisionDetails, bool),
    GetInstance(FetchInstanceDetails),
    Update(UpdateDetails, bool),
    LastOperation(PollDetails),
    Bind(BindDetails, bool),
    Unbind(UnbindDetails, bool),
    GetBinding(FetchBindingDetails),
    LastBindingOperation(PollDetails),
}

/// A programmable [`ServiceBroker`] that counts its calls.
pub struct FakeServiceBroker {
    pub services: Mutex<Outcome<Vec<Service>>>,
    pub provision: Mutex<Outcome<ProvisionedServiceSpec>>,
    pub deprovision: Mutex<Outcome<DeprovisionServiceSpec>>,
    pub get_instance: Mutex<Outcome<GetInstanceDetailsSpec>>,
    pub update: Mutex<Outcome<UpdateServiceSpec>>,
    pub last_operation: Mutex<Outcome<LastOperation>>,
    pub bind: Mutex<Outcome<Binding>>,
    pub unbind: Mutex<Outcome<UnbindSpec>>,
    pub get_binding: Mutex<Outcome<GetBindingSpec>>,
    pub last_binding_operation: Mutex<Outcome<LastOperation>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    last_call: Mutex<Option<Call>>,
    last_context: Mutex<Option<RequestContext>>,
}

impl Default for FakeServiceBroker {
    fn default() -> Self {
        let succeeded = LastOperation {
            state: LastOperationState::Succeeded,
            description: None,
        };
        Self {
            services: Mutex::new(Outcome::Ok(catalog())),
            provision: Mutex::new(Outcome::Ok(ProvisionedServiceSpec::default())),
            deprovision: Mutex::new(Outcome::Ok(DeprovisionServiceSpec::default())),
            get_instance: Mutex::new(Outcome::Ok(GetInstanceDetailsSpec::default())),
            update: Mutex::new(Outcome::Ok(UpdateServiceSpec::default())),
            last_operation: Mutex::new(Outcome::Ok(succeeded.clone())),
            bind: Mutex::new(Outcome::Ok(Binding::default())),
            unbind: Mutex::new(Outcome::Ok(UnbindSpec::default())),
            get_binding: Mutex::new(Outcome::Ok(GetBindingSpec::default())),
            last_binding_operation: Mutex::new(Outcome::Ok(succeeded)),
            calls: Mutex::new(HashMap::new()),
            last_call: Mutex::new(None),
            last_context: Mutex::new(None),
        }
    }
}

impl FakeServiceBroker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// How often `operation` (the trait method name) was called.
    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().get(operation).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.last_call.lock().unwrap().clone()
    }

    pub fn last_context(&self) -> Option<RequestContext> {
        self.last_context.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, ctx: &RequestContext, call: Option<Call>) {
        *self.calls.lock().unwrap().entry(operation).or_default() += 1;
        *self.last_context.lock().unwrap() = Some(ctx.clone());
        if call.is_some() {
            *self.last_call.lock().unwrap() = call;
        }
    }
}

#[async_trait]
impl ServiceBroker for FakeServiceBroker {
    async fn services(&self, ctx: &RequestContext) -> BrokerResult<Vec<Service>> {
        self.record("services", ctx, None);
        self.services.lock().unwrap().result()
    }

    async fn provision(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: ProvisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<ProvisionedServiceSpec> {
        self.record("provision", ctx, Some(Call::Provision(details, async_allowed)));
        self.provision.lock().unwrap().result()
    }

    async fn deprovision(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: DeprovisionDetails,
        async_allowed: bool,
    ) -> BrokerResult<DeprovisionServiceSpec> {
        self.record("deprovision", ctx, Some(Call::Deprovision(details, async_allowed)));
        self.deprovision.lock().unwrap().result()
    }

    async fn get_instance(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: FetchInstanceDetails,
    ) -> BrokerResult<GetInstanceDetailsSpec> {
        self.record("get_instance", ctx, Some(Call::GetInstance(details)));
        self.get_instance.lock().unwrap().result()
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: UpdateDetails,
        async_allowed: bool,
    ) -> BrokerResult<UpdateServiceSpec> {
        self.record("update", ctx, Some(Call::Update(details, async_allowed)));
        self.update.lock().unwrap().result()
    }

    async fn last_operation(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation> {
        self.record("last_operation", ctx, Some(Call::LastOperation(details)));
        self.last_operation.lock().unwrap().result()
    }

    async fn bind(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        details: BindDetails,
        async_allowed: bool,
    ) -> BrokerResult<Binding> {
        self.record("bind", ctx, Some(Call::Bind(details, async_allowed)));
        self.bind.lock().unwrap().result()
    }

    async fn unbind(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        details: UnbindDetails,
        async_allowed: bool,
    ) -> BrokerResult<UnbindSpec> {
        self.record("unbind", ctx, Some(Call::Unbind(details, async_allowed)));
        self.unbind.lock().unwrap().result()
    }

    async fn get_binding(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        details: FetchBindingDetails,
    ) -> BrokerResult<GetBindingSpec> {
        self.record("get_binding", ctx, Some(Call::GetBinding(details)));
        self.get_binding.lock().unwrap().result()
    }

    async fn last_binding_operation(
        &self,
        ctx: &RequestContext,
        _instance_id: &str,
        _binding_id: &str,
        details: PollDetails,
    ) -> BrokerResult<LastOperation> {
        self.record(
            "last_binding_operation",
            ctx,
            Some(Call::LastBindingOperation(details)),
        );
        self.last_binding_operation.lock().unwrap().result()
    }
}

/// One service with a plain plan and a plan carrying maintenance info.
pub fn catalog() -> Vec<Service> {
    vec![Service {
        id: SERVICE_ID.into(),
        name: "postgres".into(),
        description: "Managed Postgres".into(),
        bindable: true,
        plans: vec![
            ServicePlan {
                id: PLAN_ID.into(),
                name: "small".into(),
                description: "One node".into(),
                ..Default::default()
            },
            ServicePlan {
                id: MAINTAINED_PLAN_ID.into(),
                name: "ha".into(),
                description: "Three nodes".into(),
                maintenance_info: Some(MaintenanceInfo {
                    version: "2.0.0".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ],
        ..Default::default()
    }]
}

pub fn app(broker: Arc<FakeServiceBroker>) -> Router {
    router(broker, &BrokerConfig::default())
}

/// A request carrying `X-Broker-API-Version` when `version` is set.
pub fn request(method: Method, uri: &str, version: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(version) = version {
        builder = builder.header("X-Broker-API-Version", version);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Drive `app` with one request and decode the JSON body (`Null` if empty).
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}
