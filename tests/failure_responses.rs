//! Failure path shared by every handler, plus request identity handling.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use service_broker_api::domain::apiresponses::FailureResponse;

mod common;
use common::{app, request, send, FakeServiceBroker, Outcome, PLAN_ID, SERVICE_ID};

const INSTANCE: &str = "/v2/service_instances/i-1";
const BINDING: &str = "/v2/service_instances/i-1/service_bindings/b-1";

/// One request per operation, each reaching the backend.
fn operations() -> Vec<(&'static str, Method, String, Option<Value>)> {
    let ids = format!("service_id={SERVICE_ID}&plan_id={PLAN_ID}");
    let body = json!({"service_id": SERVICE_ID, "plan_id": PLAN_ID});
    vec![
        ("services", Method::GET, "/v2/catalog".into(), None),
        ("provision", Method::PUT, INSTANCE.into(), Some(body.clone())),
        ("update", Method::PATCH, INSTANCE.into(), Some(body.clone())),
        ("deprovision", Method::DELETE, format!("{INSTANCE}?{ids}"), None),
        ("get_instance", Method::GET, INSTANCE.into(), None),
        ("last_operation", Method::GET, format!("{INSTANCE}/last_operation"), None),
        ("bind", Method::PUT, BINDING.into(), Some(body)),
        ("unbind", Method::DELETE, format!("{BINDING}?{ids}"), None),
        ("get_binding", Method::GET, BINDING.into(), None),
        ("last_binding_operation", Method::GET, format!("{BINDING}/last_operation"), None),
    ]
}

fn fail(broker: &FakeServiceBroker, operation: &str, failure: FailureResponse) {
    match operation {
        "services" => *broker.services.lock().unwrap() = Outcome::Failure(failure),
        "provision" => *broker.provision.lock().unwrap() = Outcome::Failure(failure),
        "update" => *broker.update.lock().unwrap() = Outcome::Failure(failure),
        "deprovision" => *broker.deprovision.lock().unwrap() = Outcome::Failure(failure),
        "get_instance" => *broker.get_instance.lock().unwrap() = Outcome::Failure(failure),
        "last_operation" => *broker.last_operation.lock().unwrap() = Outcome::Failure(failure),
        "bind" => *broker.bind.lock().unwrap() = Outcome::Failure(failure),
        "unbind" => *broker.unbind.lock().unwrap() = Outcome::Failure(failure),
        "get_binding" => *broker.get_binding.lock().unwrap() = Outcome::Failure(failure),
        "last_binding_operation" => {
            *broker.last_binding_operation.lock().unwrap() = Outcome::Failure(failure)
        }
        other => panic!("unknown operation {other}"),
    }
}

#[tokio::test]
async fn test_every_handler_validates_failure_status() {
    for (operation, method, uri, body) in operations() {
        let broker = FakeServiceBroker::new();
        let invalid = StatusCode::from_u16(600).unwrap();
        fail(&broker, operation, FailureResponse::new("backend exploded", invalid, "boom"));

        let res = send(app(broker.clone()), request(method, &uri, Some("2.14"), body)).await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR, "{operation}");
        assert_eq!(res.body, json!({"description": "backend exploded"}), "{operation}");
        assert_eq!(broker.calls(operation), 1, "{operation}");
    }
}

#[tokio::test]
async fn test_every_handler_keeps_valid_failure_status() {
    for (operation, method, uri, body) in operations() {
        let broker = FakeServiceBroker::new();
        let failure = FailureResponse::builder("try later", StatusCode::SERVICE_UNAVAILABLE, "busy")
            .with_error_key("Busy")
            .build();
        fail(&broker, operation, failure);

        let res = send(app(broker.clone()), request(method, &uri, Some("2.14"), body)).await;
        assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE, "{operation}");
        assert_eq!(
            res.body,
            json!({"error": "Busy", "description": "try later"}),
            "{operation}"
        );
    }
}

#[tokio::test]
async fn test_request_identity_is_echoed() {
    let broker = FakeServiceBroker::new();

    let mut req = request(Method::GET, "/v2/catalog", Some("2.14"), None);
    req.headers_mut()
        .insert("X-Broker-API-Request-Identity", "req-123".parse().unwrap());
    let res = send(app(broker.clone()), req).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["x-broker-api-request-identity"], "req-123");
    assert_eq!(res.headers["content-type"], "application/json");

    let mut req = request(Method::GET, "/v2/catalog", None, None);
    req.headers_mut()
        .insert("X-Broker-API-Request-Identity", "req-456".parse().unwrap());
    let res = send(app(broker.clone()), req).await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(res.headers["x-broker-api-request-identity"], "req-456");

    let res = send(
        app(broker.clone()),
        request(Method::GET, "/v2/catalog", Some("2.14"), None),
    )
    .await;
    assert!(res.headers.get("x-broker-api-request-identity").is_none());
}

#[tokio::test]
async fn test_context_carries_caller_headers() {
    let broker = FakeServiceBroker::new();

    let mut req = request(Method::GET, "/v2/catalog", Some("2.14"), None);
    let headers = req.headers_mut();
    headers.insert("X-Correlation-ID", "corr-1".parse().unwrap());
    headers.insert(
        "X-Broker-API-Originating-Identity",
        "cloudfoundry eyJ1c2VyX2lkIjoiYWJjIn0=".parse().unwrap(),
    );
    send(app(broker.clone()), req).await;

    let ctx = broker.last_context().unwrap();
    assert_eq!(ctx.correlation_id(), Some("corr-1"));
    let origin = ctx.originating_identity().unwrap();
    assert_eq!(origin.platform, "cloudfoundry");
}

#[tokio::test]
async fn test_request_id_generated_and_used_as_correlation_id() {
    let broker = FakeServiceBroker::new();
    let res = send(
        app(broker.clone()),
        request(Method::GET, "/v2/catalog", Some("2.14"), None),
    )
    .await;

    let request_id = res.headers["x-request-id"].to_str().unwrap().to_string();
    assert!(!request_id.is_empty());
    let ctx = broker.last_context().unwrap();
    assert_eq!(ctx.correlation_id(), Some(request_id.as_str()));
}

#[tokio::test]
async fn test_undecodable_path_answers_json() {
    let ids = format!("service_id={SERVICE_ID}&plan_id={PLAN_ID}");
    let cases = [
        (Method::DELETE, format!("/v2/service_instances/%FF?{ids}"), "instance_id"),
        (Method::GET, "/v2/service_instances/%FF/last_operation".to_string(), "instance_id"),
        (
            Method::GET,
            "/v2/service_instances/i-1/service_bindings/%FF".to_string(),
            "binding_id",
        ),
    ];

    for (method, uri, key) in cases {
        let broker = FakeServiceBroker::new();
        let res = send(app(broker.clone()), request(method, &uri, Some("2.14"), None)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(res.headers["content-type"], "application/json", "{uri}");
        let description = res.body["description"].as_str().unwrap();
        assert!(description.contains(key), "{description}");
        assert_eq!(broker.total_calls(), 0, "{uri}");
    }
}

#[tokio::test]
async fn test_unsupported_method_answers_json() {
    let broker = FakeServiceBroker::new();
    let res = send(
        app(broker.clone()),
        request(Method::POST, "/v2/catalog", Some("2.14"), None),
    )
    .await;

    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers["content-type"], "application/json");
    assert_eq!(
        res.body,
        json!({"description": "method POST not allowed on /v2/catalog"})
    );
    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn test_unknown_path_answers_json() {
    let broker = FakeServiceBroker::new();
    let mut req = request(Method::GET, "/v2/nothing_here", Some("2.14"), None);
    req.headers_mut()
        .insert("X-Broker-API-Request-Identity", "req-9".parse().unwrap());
    let res = send(app(broker.clone()), req).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.headers["content-type"], "application/json");
    assert_eq!(res.headers["x-broker-api-request-identity"], "req-9");
    assert_eq!(res.body, json!({"description": "no route for /v2/nothing_here"}));
}
