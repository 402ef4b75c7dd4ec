//! Consent management handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::server::types::AppState;

/// `POST /api/consent` - records a consent decision.
///
/// Expects `{"granted": <bool>}`; anything else is a 400.
pub async fn consent_handler(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    let Some(granted) = payload.get("granted").and_then(Value::as_bool) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Field 'granted' is required and must be a boolean"
            })),
        )
            .into_response();
    };

    state.consent.set(granted);
    log::info!(
        "Consent {}",
        if granted { "granted" } else { "withdrawn" }
    );
    (
        StatusCode::OK,
        Json(json!({"success": true, "consent": granted})),
    )
        .into_response()
}
