//! The collector and reporting HTTP server.
//!
//! One router carries both surfaces: the collection endpoints
//! (`/api/track`, `/api/consent`) and the read-only reports the
//! dashboard consumes. Middleware applies in layer order: automated
//! client logging, rate limiting, CORS, then security headers on the
//! way out.

pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod types;

use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::config::MAX_JSON_BODY_BYTES;

pub use rate_limit::FixedWindowLimiter;
pub use types::AppState;

/// Builds the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/track", post(handlers::track_handler))
        .route("/api/consent", post(handlers::consent_handler))
        .route("/api/analytics", get(handlers::analytics_handler))
        .route("/api/summary", get(handlers::summary_handler))
        .route("/api/countries", get(handlers::countries_handler))
        .route("/api/regions/{country}", get(handlers::regions_handler))
        .route("/api/cities/{country}", get(handlers::cities_handler))
        .route("/api/stats", get(handlers::browser_stats_handler))
        .route(
            "/api/browser-versions",
            get(handlers::browser_versions_handler),
        )
        .route("/api/devices", get(handlers::devices_handler))
        .route("/api/os-stats", get(handlers::os_stats_handler))
        .route("/api/languages", get(handlers::languages_handler))
        .route(
            "/api/screen-resolutions",
            get(handlers::screen_resolutions_handler),
        )
        .route("/api/top-pages", get(handlers::top_pages_handler))
        .route("/api/referrers", get(handlers::referrers_handler))
        .route("/api/timeline", get(handlers::timeline_handler))
        .route("/api/geo-heatmap", get(handlers::geo_heatmap_handler))
        .route("/api/privacy-stats", get(handlers::privacy_stats_handler))
        .route("/api/health", get(handlers::health_handler))
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_BYTES))
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::cors))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ))
        .layer(axum::middleware::from_fn(
            middleware::log_automated_clients,
        ))
        .with_state(state)
}

/// Creates and starts the collector server, serving until shutdown.
pub async fn start_server(port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind collector to port {}: {}", port, e))?;

    log::info!("Collector listening on http://0.0.0.0:{}/", port);
    log::info!("  - Tracking: http://0.0.0.0:{}/api/track", port);
    log::info!("  - Summary: http://0.0.0.0:{}/api/summary", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("Collector server error: {}", e))?;

    Ok(())
}
