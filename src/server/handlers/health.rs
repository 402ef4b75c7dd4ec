//! Liveness handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::server::types::AppState;

/// `GET /api/health` - liveness probe: a database ping doubling as a
/// visitor count.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let visitors = crate::storage::queries::count_visitors(&state.pool).await;

    let (code, body) = match visitors {
        Ok(count) => (
            StatusCode::OK,
            json!({
                "status": "ok",
                "database": true,
                "visitorCount": count,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        ),
        Err(e) => {
            log::error!("Health probe failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "status": "degraded",
                    "database": false,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                }),
            )
        }
    };
    (code, Json(body)).into_response()
}
