use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use student_records::{app, AppState, MemoryStudentStore, StudentStore};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:5173";

fn test_app() -> (Router, Arc<MemoryStudentStore>) {
    let store = Arc::new(MemoryStudentStore::new());
    let state = AppState::new(store.clone());
    (app(state, HeaderValue::from_static(ORIGIN)), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).expect("response body was not JSON");
    (status, value)
}

async fn list_len(app: &Router) -> usize {
    let (status, body) = send_json(app, "GET", "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("list is an array").len()
}

fn error_message(body: &Value) -> &str {
    body["error"].as_str().expect("error body carries a message")
}

#[tokio::test]
async fn create_update_delete_then_get_is_not_found() {
    let (app, _) = test_app();

    let (status, created) = send_json(
        &app,
        "POST",
        "/students",
        Some(json!({"name": "Ana", "email": "ana@x.com", "age": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("generated integer id");
    assert_eq!(created["name"], "Ana");

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/students/{id}"),
        Some(json!({"name": "Ana", "email": "ana@x.com", "age": 21})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "name": "Ana", "email": "ana@x.com", "age": 21}));

    let (status, body) = send(&app, "DELETE", &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send_json(&app, "GET", &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Student not found");
}

#[tokio::test]
async fn create_without_name_is_rejected_and_not_stored() {
    let (app, _) = test_app();

    let (status, body) = send_json(&app, "POST", "/students", Some(json!({"email": "ana@x.com", "age": 20}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn created_record_reads_back_with_same_fields() {
    let (app, _) = test_app();
    let input = json!({"name": "Bo", "email": "bo@x.com", "age": 33});

    let (_, created) = send_json(&app, "POST", "/students", Some(input.clone())).await;
    let (status, fetched) = send_json(&app, "GET", &format!("/students/{}", created["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    for field in ["name", "email", "age"] {
        assert_eq!(fetched[field], input[field]);
    }
}

#[tokio::test]
async fn list_grows_and_shrinks_by_one() {
    let (app, _) = test_app();
    assert_eq!(list_len(&app).await, 0);

    let (_, a) = send_json(&app, "POST", "/students", Some(json!({"name": "A", "email": "a@x.com", "age": 1}))).await;
    assert_eq!(list_len(&app).await, 1);
    send_json(&app, "POST", "/students", Some(json!({"name": "B", "email": "b@x.com", "age": 2}))).await;
    assert_eq!(list_len(&app).await, 2);

    let (status, _) = send(&app, "DELETE", &format!("/students/{}", a["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(list_len(&app).await, 1);
}

#[tokio::test]
async fn update_touches_only_the_target() {
    let (app, _) = test_app();
    for (name, age) in [("A", 10), ("B", 11), ("C", 12)] {
        send_json(
            &app,
            "POST",
            "/students",
            Some(json!({"name": name, "email": format!("{name}@x.com"), "age": age})),
        )
        .await;
    }
    let (_, before) = send_json(&app, "GET", "/students", None).await;
    let target = before[1]["id"].clone();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/students/{target}"),
        Some(json!({"name": "Bee", "email": "bee@x.com", "age": 40})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send_json(&app, "GET", "/students", None).await;
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1], json!({"id": target, "name": "Bee", "email": "bee@x.com", "age": 40}));
}

#[tokio::test]
async fn never_used_ids_are_not_found() {
    let (app, _) = test_app();
    for uri in ["/students/1", "/students/424242", "/students/-5", "/students/abc", "/students/99999999999"] {
        let (status, body) = send_json(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(error_message(&body), "Student not found");
    }
}

#[tokio::test]
async fn mutations_on_missing_records_are_client_errors() {
    let (app, _) = test_app();

    let (status, body) = send_json(
        &app,
        "PUT",
        "/students/7",
        Some(json!({"name": "Ana", "email": "ana@x.com", "age": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Student not found");

    let (status, body) = send_json(&app, "DELETE", "/students/7", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Student not found");

    let (status, body) = send_json(&app, "DELETE", "/students/seven", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "invalid id 'seven'");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let (app, _) = test_app();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/students")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/students")
                .body(Body::from(r#"{"name":"Ana","email":"ana@x.com","age":20}"#))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("error body is JSON");
    assert!(!error_message(&body).is_empty());

    let (status, body) = send_json(
        &app,
        "PUT",
        "/students/1",
        Some(json!({"name": "Ana", "email": "ana@x.com", "age": "twenty"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "age must be an integer");
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn duplicate_emails_are_accepted() {
    let (app, _) = test_app();
    let input = json!({"name": "Ana", "email": "same@x.com", "age": 20});
    let (first, a) = send_json(&app, "POST", "/students", Some(input.clone())).await;
    let (second, b) = send_json(&app, "POST", "/students", Some(input)).await;
    assert_eq!((first, second), (StatusCode::CREATED, StatusCode::CREATED));
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn client_supplied_id_is_ignored() {
    let (app, _) = test_app();
    let (_, created) = send_json(
        &app,
        "POST",
        "/students",
        Some(json!({"id": 500, "name": "Ana", "email": "ana@x.com", "age": 20})),
    )
    .await;
    assert_eq!(created["id"], 1);

    let (_, updated) = send_json(
        &app,
        "PUT",
        "/students/1",
        Some(json!({"id": 9, "name": "Ana", "email": "ana@x.com", "age": 22})),
    )
    .await;
    assert_eq!(updated["id"], 1);
}

#[tokio::test]
async fn store_failures_on_reads_are_server_errors() {
    let (app, store) = test_app();
    store.close().await;

    let (status, body) = send_json(&app, "GET", "/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "store is closed");

    let (status, _) = send_json(&app, "GET", "/students/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send_json(&app, "POST", "/students", Some(json!({"name": "A", "email": "a@x.com", "age": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn root_health_and_readiness() {
    let (app, store) = test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Student Info API is running");

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send_json(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    store.close().await;
    let (status, body) = send_json(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn version_reports_crate_name() {
    let (app, _) = test_app();
    let (status, body) = send_json(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "student-records");
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let (app, _) = test_app();
    let name = "a".repeat(2 * 1024 * 1024);
    let payload = json!({"name": name, "email": "a@x.com", "age": 1}).to_string();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/students")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, payload.len())
                .body(Body::from(payload))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn openapi_document_lists_student_paths() {
    let (app, _) = test_app();
    let (status, doc) = send_json(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/students"]["post"].is_object());
    assert!(doc["paths"]["/students/{id}"]["delete"].is_object());
}

#[tokio::test]
async fn cors_allows_only_the_configured_origin() {
    let (app, _) = test_app();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/students")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/students")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
