//! Aggregate reporting handlers.
//!
//! Every handler reads through [`crate::storage::queries`]; shapes are
//! plain JSON arrays/objects keyed to what the dashboard consumes.
//! Database failures are logged in full and surfaced generically.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::config::{
    BROWSER_VERSION_REPORT_LIMIT, DEFAULT_REPORT_LIMIT, DEFAULT_TIMELINE_DAYS, GEO_HEATMAP_LIMIT,
    MAX_REPORT_LIMIT, REPORT_SCAN_LIMIT, RETENTION_DAYS,
};
use crate::error_handling::DatabaseError;
use crate::geoip;
use crate::server::types::AppState;
use crate::storage::queries;
use crate::storage::{GroupField, PlaceField};

fn db_failure(context: &str, e: DatabaseError) -> Response {
    log::error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": "Internal server error"})),
    )
        .into_response()
}

fn keyed_counts(pairs: Vec<(String, i64)>, key: &str, count_key: &str) -> Response {
    let rows: Vec<serde_json::Value> = pairs
        .into_iter()
        .map(|(value, count)| json!({key: value, count_key: count}))
        .collect();
    Json(rows).into_response()
}

async fn grouped_report(
    state: &AppState,
    field: GroupField,
    key: &str,
    context: &str,
) -> Response {
    match queries::grouped_counts(&state.pool, field, DEFAULT_REPORT_LIMIT).await {
        Ok(pairs) => keyed_counts(pairs, key, "count"),
        Err(e) => db_failure(context, e),
    }
}

/// `GET /api/analytics` - the most recent visitor records, newest first.
pub async fn analytics_handler(State(state): State<AppState>) -> Response {
    match queries::recent_visitors(&state.pool, REPORT_SCAN_LIMIT).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => db_failure("Failed to list recent visitors", e),
    }
}

/// `GET /api/summary` - headline traffic totals and week-over-week growth.
pub async fn summary_handler(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();
    let now_millis = now.timestamp_millis();
    const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

    let result = async {
        let total = queries::count_visitors(&state.pool).await?;
        let unique = queries::count_unique_visitors_since(&state.pool, 0).await?;
        let day = queries::count_visitors_since(&state.pool, now_millis - DAY_MILLIS).await?;
        let week = queries::count_visitors_since(&state.pool, now_millis - 7 * DAY_MILLIS).await?;
        let month =
            queries::count_visitors_since(&state.pool, now_millis - 30 * DAY_MILLIS).await?;
        let growth = queries::growth_rate(&state.pool, now_millis).await?;
        Ok::<_, DatabaseError>((total, unique, day, week, month, growth))
    }
    .await;

    match result {
        Ok((total, unique, day, week, month, growth)) => Json(json!({
            "totalVisitors": total,
            "uniqueVisitors": unique,
            "visitors24h": day,
            "visitors7d": week,
            "visitors30d": month,
            "growthRate": growth,
            "timestamp": now.to_rfc3339(),
        }))
        .into_response(),
        Err(e) => db_failure("Failed to build summary", e),
    }
}

/// `GET /api/countries` - visitor counts by country.
pub async fn countries_handler(State(state): State<AppState>) -> Response {
    grouped_report(
        &state,
        GroupField::Country,
        "country_code",
        "Failed to count countries",
    )
    .await
}

/// `GET /api/stats` - visitor counts by browser family.
pub async fn browser_stats_handler(State(state): State<AppState>) -> Response {
    grouped_report(
        &state,
        GroupField::Browser,
        "browser_name",
        "Failed to count browsers",
    )
    .await
}

/// `GET /api/devices` - visitor counts by device class.
pub async fn devices_handler(State(state): State<AppState>) -> Response {
    grouped_report(
        &state,
        GroupField::Device,
        "device_type",
        "Failed to count devices",
    )
    .await
}

/// `GET /api/os-stats` - visitor counts by operating system.
pub async fn os_stats_handler(State(state): State<AppState>) -> Response {
    grouped_report(&state, GroupField::Os, "os_name", "Failed to count OSes").await
}

/// `GET /api/languages` - visitor counts by language tag.
pub async fn languages_handler(State(state): State<AppState>) -> Response {
    grouped_report(
        &state,
        GroupField::Language,
        "language",
        "Failed to count languages",
    )
    .await
}

/// Query parameters for reports that accept a result cap.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    /// Maximum entries to return (default 10, capped at 100)
    pub limit: Option<usize>,
}

impl LimitParams {
    fn resolve(&self) -> usize {
        self.limit
            .filter(|l| (1..=MAX_REPORT_LIMIT).contains(l))
            .unwrap_or(DEFAULT_REPORT_LIMIT)
    }
}

/// `GET /api/top-pages` - visit counts by page URL.
pub async fn top_pages_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Response {
    match queries::grouped_counts(&state.pool, GroupField::Page, params.resolve()).await {
        Ok(pairs) => keyed_counts(pairs, "page_visited", "count"),
        Err(e) => db_failure("Failed to count pages", e),
    }
}

/// `GET /api/referrers` - visit counts by referring URL.
pub async fn referrers_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Response {
    match queries::grouped_counts(&state.pool, GroupField::Referrer, params.resolve()).await {
        Ok(pairs) => keyed_counts(pairs, "referrer", "count"),
        Err(e) => db_failure("Failed to count referrers", e),
    }
}

/// `GET /api/regions/{country}` - region counts within one country.
pub async fn regions_handler(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<LimitParams>,
) -> Response {
    let country = country.to_uppercase();
    match queries::place_counts(&state.pool, PlaceField::Region, &country, params.resolve()).await {
        Ok(pairs) => keyed_counts(pairs, "region", "count"),
        Err(e) => db_failure("Failed to count regions", e),
    }
}

/// `GET /api/cities/{country}` - city counts within one country.
pub async fn cities_handler(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<LimitParams>,
) -> Response {
    let country = country.to_uppercase();
    match queries::place_counts(&state.pool, PlaceField::City, &country, params.resolve()).await {
        Ok(pairs) => keyed_counts(pairs, "city", "count"),
        Err(e) => db_failure("Failed to count cities", e),
    }
}

/// `GET /api/browser-versions` - counts by browser name/version pair.
pub async fn browser_versions_handler(State(state): State<AppState>) -> Response {
    match queries::browser_version_counts(&state.pool, BROWSER_VERSION_REPORT_LIMIT).await {
        Ok(pairs) => keyed_counts(pairs, "browser", "count"),
        Err(e) => db_failure("Failed to count browser versions", e),
    }
}

/// `GET /api/screen-resolutions` - counts by screen resolution.
pub async fn screen_resolutions_handler(State(state): State<AppState>) -> Response {
    match queries::screen_resolution_counts(&state.pool, DEFAULT_REPORT_LIMIT).await {
        Ok(pairs) => keyed_counts(pairs, "resolution", "count"),
        Err(e) => db_failure("Failed to count resolutions", e),
    }
}

/// Query parameters for the timeline report.
#[derive(Debug, Deserialize)]
pub struct TimelineParams {
    /// Trailing day span (default 30)
    pub days: Option<i64>,
}

/// `GET /api/timeline` - daily visit counts, oldest day first.
pub async fn timeline_handler(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Response {
    let days = params
        .days
        .filter(|d| (1..=365).contains(d))
        .unwrap_or(DEFAULT_TIMELINE_DAYS);
    match queries::timeline(&state.pool, days).await {
        Ok(pairs) => keyed_counts(pairs, "date", "visitors"),
        Err(e) => db_failure("Failed to build timeline", e),
    }
}

/// `GET /api/geo-heatmap` - recent records with resolved coordinates.
pub async fn geo_heatmap_handler(State(state): State<AppState>) -> Response {
    match queries::geo_heatmap(&state.pool, GEO_HEATMAP_LIMIT).await {
        Ok(points) => Json(points).into_response(),
        Err(e) => db_failure("Failed to build heatmap", e),
    }
}

/// `GET /api/privacy-stats` - record totals and the active privacy policy.
pub async fn privacy_stats_handler(State(state): State<AppState>) -> Response {
    match queries::privacy_counts(&state.pool).await {
        Ok((total, consented)) => {
            let consent_rate = if total > 0 {
                consented as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            Json(json!({
                "totalRecords": total,
                "consentedRecords": consented,
                "nonConsentedRecords": total - consented,
                "consentRate": consent_rate,
                "retentionDays": RETENTION_DAYS,
                "ipAnonymization": true,
                "geoipEnabled": geoip::is_enabled(),
                "consentGranted": state.consent.granted(),
                "consentUpdatedAt": state.consent.updated_at().to_rfc3339(),
            }))
            .into_response()
        }
        Err(e) => db_failure("Failed to build privacy stats", e),
    }
}
