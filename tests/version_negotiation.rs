//! `X-Broker-API-Version` handling across the whole router.

use axum::http::{Method, StatusCode};
use serde_json::json;

use service_broker_api::domain::specs::{Binding, GetBindingSpec};

mod common;
use common::{app, request, send, Outcome, FakeServiceBroker, PLAN_ID, SERVICE_ID};

const INSTANCE: &str = "/v2/service_instances/i-1";
const BINDING: &str = "/v2/service_instances/i-1/service_bindings/b-1";

fn every_endpoint() -> Vec<(Method, String)> {
    vec![
        (Method::GET, "/v2/catalog".to_string()),
        (Method::PUT, INSTANCE.to_string()),
        (Method::PATCH, INSTANCE.to_string()),
        (Method::DELETE, format!("{INSTANCE}?service_id={SERVICE_ID}&plan_id={PLAN_ID}")),
        (Method::GET, INSTANCE.to_string()),
        (Method::GET, format!("{INSTANCE}/last_operation")),
        (Method::PUT, BINDING.to_string()),
        (Method::GET, BINDING.to_string()),
        (Method::DELETE, format!("{BINDING}?service_id={SERVICE_ID}&plan_id={PLAN_ID}")),
        (Method::GET, format!("{BINDING}/last_operation")),
    ]
}

#[tokio::test]
async fn test_missing_version_header_rejected_everywhere() {
    let broker = FakeServiceBroker::new();
    let body = json!({"service_id": SERVICE_ID, "plan_id": PLAN_ID});

    for (method, uri) in every_endpoint() {
        let payload = matches!(method, Method::PUT | Method::PATCH).then(|| body.clone());
        let res = send(app(broker.clone()), request(method.clone(), &uri, None, payload)).await;

        assert_eq!(res.status, StatusCode::PRECONDITION_FAILED, "{method} {uri}");
        assert_eq!(
            res.body,
            json!({"description": "X-Broker-API-Version Header not set"}),
            "{method} {uri}"
        );
    }

    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_and_unsupported_versions() {
    let broker = FakeServiceBroker::new();

    let res = send(
        app(broker.clone()),
        request(Method::GET, "/v2/catalog", Some("latest"), None),
    )
    .await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        res.body["description"],
        "X-Broker-API-Version Header must contain a version"
    );

    let res = send(
        app(broker.clone()),
        request(Method::GET, "/v2/catalog", Some("1.13"), None),
    )
    .await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(res.body["description"], "X-Broker-API-Version Header must be 2.x");

    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn test_any_2x_version_reaches_catalog() {
    for version in ["2.0", "2.13", "2.17"] {
        let broker = FakeServiceBroker::new();
        let res = send(
            app(broker.clone()),
            request(Method::GET, "/v2/catalog", Some(version), None),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK, "{version}");
        assert_eq!(res.body["services"][0]["id"], SERVICE_ID);
        assert_eq!(broker.calls("services"), 1);
    }
}

#[tokio::test]
async fn test_get_binding_requires_2_14() {
    let broker = FakeServiceBroker::new();
    *broker.get_binding.lock().unwrap() = Outcome::Ok(GetBindingSpec {
        credentials: Some(json!({"host": "db.local", "password": "secret"})),
        parameters: Some(json!({"role": "reader"})),
        ..Default::default()
    });

    let res = send(app(broker.clone()), request(Method::GET, BINDING, Some("2.13"), None)).await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        res.body["description"],
        "get binding endpoint only supported starting with OSB version 2.14"
    );
    assert_eq!(broker.calls("get_binding"), 0);

    let res = send(app(broker.clone()), request(Method::GET, BINDING, Some("2.14"), None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "credentials": {"host": "db.local", "password": "secret"},
            "parameters": {"role": "reader"}
        })
    );
    assert_eq!(broker.calls("get_binding"), 1);
}

#[tokio::test]
async fn test_get_instance_and_binding_last_operation_require_2_14() {
    let broker = FakeServiceBroker::new();

    let res = send(app(broker.clone()), request(Method::GET, INSTANCE, Some("2.13"), None)).await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        res.body["description"],
        "get instance endpoint only supported starting with OSB version 2.14"
    );

    let uri = format!("{BINDING}/last_operation");
    let res = send(app(broker.clone()), request(Method::GET, &uri, Some("2.13"), None)).await;
    assert_eq!(res.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        res.body["description"],
        "last binding operation endpoint only supported starting with OSB version 2.14"
    );

    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn test_bind_is_synchronous_before_2_14() {
    let broker = FakeServiceBroker::new();
    *broker.bind.lock().unwrap() = Outcome::Ok(Binding {
        is_async: true,
        operation_data: Some("op-1".into()),
        ..Default::default()
    });
    let body = json!({"service_id": SERVICE_ID, "plan_id": PLAN_ID});
    let uri = format!("{BINDING}?accepts_incomplete=true");

    let res = send(
        app(broker.clone()),
        request(Method::PUT, &uri, Some("2.13"), Some(body.clone())),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert!(matches!(broker.last_call(), Some(common::Call::Bind(_, false))));

    let res = send(app(broker.clone()), request(Method::PUT, &uri, Some("2.14"), Some(body))).await;
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.body, json!({"operation": "op-1"}));
    assert!(matches!(broker.last_call(), Some(common::Call::Bind(_, true))));
}

#[tokio::test]
async fn test_negotiated_version_is_in_context() {
    let broker = FakeServiceBroker::new();
    send(
        app(broker.clone()),
        request(Method::GET, "/v2/catalog", Some("2.15"), None),
    )
    .await;

    let ctx = broker.last_context().unwrap();
    let version = ctx.api_version().unwrap();
    assert_eq!((version.major, version.minor), (2, 15));
}
