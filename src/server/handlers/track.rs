//! Tracking record collection handler.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::ingest::{ingest_record, IngestOutcome};
use crate::server::middleware::forwarded_ip;
use crate::server::types::AppState;

/// `POST /api/track` - accepts one tracking record.
///
/// The client-reported `ip_address` field is ignored; the connection's
/// source address (or the proxy-forwarded one) is authoritative.
pub async fn track_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let Some(record) = payload.as_object() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Request body must be a JSON object"
            })),
        )
            .into_response();
    };

    let client_ip = forwarded_ip(&headers).unwrap_or_else(|| addr.ip().to_string());

    let mut record = record.clone();
    if let Some(user_agent) = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
    {
        // Header wins over any client-reported field.
        record.insert(
            "user_agent".to_string(),
            Value::String(user_agent.to_string()),
        );
    }

    match ingest_record(&state.pool, &state.consent, &record, &client_ip).await {
        Ok(IngestOutcome::Recorded { id }) => {
            (StatusCode::OK, Json(json!({"success": true, "id": id}))).into_response()
        }
        // A consent drop is normal operation, not a failure the client
        // should retry or surface.
        Ok(IngestOutcome::ConsentWithheld) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Data collection requires consent"
            })),
        )
            .into_response(),
        Ok(IngestOutcome::Rejected { errors }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Validation failed",
                "details": errors
            })),
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to store tracking record: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Internal server error"
                })),
            )
                .into_response()
        }
    }
}
