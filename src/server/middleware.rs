//! Request middleware: client IP resolution, security headers, CORS,
//! rate limiting, and automated-client logging.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::threat::user_agent::analyze_user_agent;
use crate::threat::RiskLevel;

use super::types::AppState;

/// Extracts the first `X-Forwarded-For` entry, if any.
pub fn forwarded_ip(headers: &header::HeaderMap) -> Option<String> {
    let value = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Resolves the client IP for a request.
///
/// Honors the first entry of `X-Forwarded-For` when present (the server
/// is expected to sit behind a reverse proxy), falling back to the
/// socket peer address.
pub fn client_ip(request: &Request) -> String {
    if let Some(ip) = forwarded_ip(request.headers()) {
        return ip;
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Adds standard security headers to every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode=block"),
    );
    response
}

/// Permissive CORS for the collector endpoints; answers preflight
/// requests directly.
pub async fn cors(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = if preflight {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Enforces the per-IP request cap.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if !state.rate_limiter.check(&ip).await {
        log::warn!("Rate limit exceeded for {}", ip);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(json!({
                "success": false,
                "error": "Too many requests, please try again later"
            })),
        )
            .into_response();
    }
    next.run(request).await
}

/// Logs requests whose user agent looks automated. Observational only;
/// the request proceeds regardless.
pub async fn log_automated_clients(request: Request, next: Next) -> Response {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let analysis = analyze_user_agent(user_agent.as_deref());
    if analysis.risk != RiskLevel::Low && !analysis.threats.is_empty() {
        log::info!(
            "Automated client on {} {}: {}",
            request.method(),
            request.uri().path(),
            analysis.threats.join("; ")
        );
    }
    next.run(request).await
}
