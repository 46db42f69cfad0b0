// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cookbook::{create_router, ServerConfig, ServerState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Create a router backed by a fresh temporary database.
///
/// Returns (TempDir, Router) - keep the TempDir alive to prevent cleanup.
/// The database lives at `<tempdir>/test.db` for tests that want to inspect
/// it directly.
pub fn setup_test_app() -> (TempDir, Router) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.db");

    cookbook::db::init(&db_path).unwrap();

    let config = ServerConfig::default().with_db_path(db_path);
    let state = Arc::new(ServerState::new(config));
    (temp_dir, create_router(state))
}

/// Open a connection to the test database created by `setup_test_app`
pub fn open_test_db(temp_dir: &TempDir) -> rusqlite::Connection {
    cookbook::db::open(temp_dir.path().join("test.db")).unwrap()
}

/// Send a request without a body and return (status, parsed JSON body).
/// An empty body parses as `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    dispatch(app, request).await
}

/// Send a request with a JSON body and return (status, parsed JSON body)
pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

/// Create a recipe and return its id
pub async fn create_recipe(app: &Router, title: &str, cook_time: i64) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/recipes/",
        serde_json::json!({
            "title": title,
            "description": format!("{} description", title),
            "cook_time": cook_time,
            "ingredients": [{"title": "Salt", "quantity": "1 pinch"}],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body["id"].as_i64().unwrap()
}
