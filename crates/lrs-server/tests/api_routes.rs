use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use lrs_client::LrsBackend;
use lrs_ontology::OntologyBackend;
use lrs_server::{app, build_service, config::Config, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const BASE: &str = "/services/lrsconnect";
const COMPLETED: &str = "http://adlnet.gov/expapi/verbs/completed";
const ACTIVITY: &str = "http://www.appsist.de/ontology/festo/abc123";

fn memory_config() -> Config {
    let mut config = Config::default();
    config.lrs.backend = LrsBackend::Memory;
    config.ontology.backend = OntologyBackend::Memory;
    config.ontology.uris = vec![ACTIVITY.to_string()];
    config
}

fn test_app(base_path: &str) -> Router {
    let service = build_service(&memory_config()).unwrap();
    app(
        AppState {
            service: Arc::new(service),
        },
        base_path,
    )
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn count(app: &Router, agent: &str, activity: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post(
            &format!("{BASE}/statements/count"),
            json!({ "agent": agent, "verb": COMPLETED, "activityId": activity }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn test_health_check_returns_ok() {
    let response = test_app(BASE)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_build_then_count() {
    let app = test_app(BASE);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post(
                &format!("{BASE}/statements/build"),
                json!({ "agent": "u1", "verb": COMPLETED, "activityId": ACTIVITY }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let json = count(&app, "u1", ACTIVITY).await;
    assert_eq!(json["agent"], "u1");
    assert_eq!(json["verb"], COMPLETED);
    assert_eq!(json["activityId"], ACTIVITY);
    assert_eq!(json["amount"], 2);

    // Fragment resolved through the in-memory ontology.
    assert_eq!(count(&app, "u1", "abc123").await["amount"], 2);
    assert_eq!(count(&app, "u1", "unknown").await["amount"], 0);
    assert_eq!(count(&app, "u2", ACTIVITY).await["amount"], 0);
}

#[tokio::test]
async fn test_store_raw_statement() {
    let app = test_app(BASE);
    let statement = json!({
        "actor": { "account": { "homePage": "http://dev.appsist.de", "name": "u1" } },
        "verb": { "id": COMPLETED, "display": { "en-US": "completed" } },
        "object": { "objectType": "Activity", "id": ACTIVITY }
    });

    let response = app
        .clone()
        .oneshot(post(
            &format!("{BASE}/statements"),
            json!({ "statement": statement.to_string() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    assert_eq!(count(&app, "u1", ACTIVITY).await["amount"], 1);
}

#[tokio::test]
async fn test_malformed_statement_is_accepted_and_dropped() {
    let app = test_app(BASE);

    let response = app
        .clone()
        .oneshot(post(
            &format!("{BASE}/statements"),
            json!({ "statement": "{not json" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    assert_eq!(count(&app, "u1", "").await["amount"], 0);
}

#[tokio::test]
async fn test_void_progress_retracts_completions() {
    let app = test_app(BASE);

    for activity in [ACTIVITY, "http://www.appsist.de/ontology/festo/xyz"] {
        app.clone()
            .oneshot(post(
                &format!("{BASE}/statements/build"),
                json!({ "agent": "u1", "verb": COMPLETED, "activityId": activity }),
            ))
            .await
            .unwrap();
    }
    assert_eq!(count(&app, "u1", "").await["amount"], 2);

    let response = app
        .clone()
        .oneshot(post(
            &format!("{BASE}/progress/void"),
            json!({ "userId": "u1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    assert_eq!(count(&app, "u1", "").await["amount"], 0);
}

#[tokio::test]
async fn test_interacted_items_is_accepted() {
    let response = test_app(BASE)
        .oneshot(post(
            &format!("{BASE}/items/interacted"),
            json!({ "agent": "u1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_missing_fields_count_zero() {
    let response = test_app(BASE)
        .oneshot(post(&format!("{BASE}/statements/count"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["amount"], 0);
    assert_eq!(json["agent"], Value::Null);
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{BASE}/statements/build"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"agent\": "))
        .unwrap();

    let response = test_app(BASE).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_routes_mount_at_root_without_base_path() {
    let app = test_app("/");

    let response = app
        .clone()
        .oneshot(post(
            "/statements/build",
            json!({ "agent": "u1", "verb": COMPLETED, "activityId": ACTIVITY }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app
        .oneshot(post(&format!("{BASE}/statements/build"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
