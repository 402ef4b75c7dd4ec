// Tracking endpoint response-shape tests, invoking the handler directly.

mod helpers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use visitor_pulse::privacy::ConsentState;
use visitor_pulse::server::handlers::track_handler;
use visitor_pulse::server::AppState;

use helpers::create_test_pool;

async fn state() -> AppState {
    AppState::new(Arc::new(create_test_pool().await), Arc::new(ConsentState::new()))
}

fn peer() -> ConnectInfo<SocketAddr> {
    ConnectInfo("203.0.113.45:55544".parse().expect("valid socket addr"))
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "user-agent",
        HeaderValue::from_static("Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0"),
    );
    headers
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn test_track_accepts_valid_record() {
    let state = state().await;
    let response = track_handler(
        State(state),
        peer(),
        browser_headers(),
        Json(json!({"browser_name": "Firefox", "device_type": "Desktop"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["id"].is_i64() || body["id"].is_u64());
}

#[tokio::test]
async fn test_track_rejects_invalid_record_with_details() {
    let state = state().await;
    let response = track_handler(
        State(state),
        peer(),
        browser_headers(),
        Json(json!({"device_type": "Phone"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Validation failed"));
    assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_track_consent_withheld_still_reports_success() {
    // A consent drop is the service working as configured; clients must
    // not see it as an error.
    let state = state().await;
    state.consent.set(false);
    let response = track_handler(
        State(state.clone()),
        peer(),
        browser_headers(),
        Json(json!({"browser_name": "Firefox"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["message"]
        .as_str()
        .is_some_and(|m| m.contains("consent")));
    assert!(body.get("id").is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors")
        .fetch_one(state.pool.as_ref())
        .await
        .expect("count query");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_track_rejects_non_object_body() {
    let state = state().await;
    let response = track_handler(
        State(state),
        peer(),
        browser_headers(),
        Json(json!(["not", "an", "object"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}
