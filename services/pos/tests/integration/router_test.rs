use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use showroom_pos::router::build_router;
use showroom_pos::state::AppState;

use crate::helpers::settings;

// Requests below are all answered before any query runs, so no database is
// attached.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        auth: settings(),
    };
    TestServer::new(build_router(state, Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn should_report_health() {
    let response = server().get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn should_reject_missing_token_with_envelope() {
    let response = server().get("/api/v1/customers").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "missing bearer token");
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let response = server()
        .get("/api/v1/auth/me")
        .authorization_bearer("not-a-jwt")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn should_reject_malformed_login_body() {
    let response = server()
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "sari" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["field"], "body");
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server().get("/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
