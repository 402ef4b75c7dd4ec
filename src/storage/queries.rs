//! Aggregate queries backing the reporting endpoints.
//!
//! Counting endpoints aggregate over a bounded scan of the most recent
//! records rather than the full table, so report cost stays flat as the
//! table grows. Counting happens in memory with a map-increment pass and
//! a descending sort, ties broken lexicographically for stable output.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::config::REPORT_SCAN_LIMIT;
use crate::error_handling::DatabaseError;

/// Columns that grouped count reports may aggregate over.
///
/// A closed enum rather than a free-form column name keeps query text
/// fully static.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    /// GeoIP country code
    Country,
    /// Browser family name
    Browser,
    /// Device class
    Device,
    /// Operating system name
    Os,
    /// Primary language tag
    Language,
    /// Tracked page URL
    Page,
    /// Referring URL
    Referrer,
}

impl GroupField {
    fn as_column(self) -> &'static str {
        match self {
            GroupField::Country => "country_code",
            GroupField::Browser => "browser_name",
            GroupField::Device => "device_type",
            GroupField::Os => "os_name",
            GroupField::Language => "language",
            GroupField::Page => "page_visited",
            GroupField::Referrer => "referrer",
        }
    }
}

/// A single point for the geographic heatmap.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// GeoIP country code, when resolved
    pub country_code: Option<String>,
    /// GeoIP city name, when resolved
    pub city: Option<String>,
}

/// One row of the recent-visitors listing.
///
/// A trimmed projection of the full record: fingerprint fields are
/// deliberately excluded from the listing surface.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct VisitorSummary {
    /// Row id
    pub id: i64,
    /// Anonymized source IP
    pub ip_address: String,
    /// Browser family name
    pub browser_name: Option<String>,
    /// Operating system name
    pub os_name: Option<String>,
    /// Device class
    pub device_type: Option<String>,
    /// GeoIP country code
    pub country_code: Option<String>,
    /// GeoIP city name
    pub city: Option<String>,
    /// Tracked page URL
    pub page_visited: Option<String>,
    /// Referring URL
    pub referrer: Option<String>,
    /// Insertion time, milliseconds since the Unix epoch
    pub created_at: i64,
}

/// Fetches the most recent visitor records, newest first.
pub async fn recent_visitors(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<VisitorSummary>, DatabaseError> {
    let rows = sqlx::query_as::<_, VisitorSummary>(
        "SELECT id, ip_address, browser_name, os_name, device_type, \
                country_code, city, page_visited, referrer, created_at \
         FROM visitors ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Counts all stored visitor records.
pub async fn count_visitors(pool: &SqlitePool) -> Result<i64, DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Counts visitor records created at or after the given epoch-millisecond
/// timestamp.
pub async fn count_visitors_since(pool: &SqlitePool, since: i64) -> Result<i64, DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE created_at >= ?")
        .bind(since)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Counts distinct anonymized IPs seen at or after the given timestamp.
///
/// Anonymization truncates addresses before storage, so "unique" here
/// means unique truncated prefixes, an intentional undercount.
pub async fn count_unique_visitors_since(
    pool: &SqlitePool,
    since: i64,
) -> Result<i64, DatabaseError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT ip_address) FROM visitors WHERE created_at >= ?")
            .bind(since)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Week-over-week growth rate in percent: the last seven days of traffic
/// against the seven days before that. Returns 0 when the prior window is
/// empty.
pub async fn growth_rate(pool: &SqlitePool, now: i64) -> Result<f64, DatabaseError> {
    const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;
    let recent = count_visitors_since(pool, now - WEEK_MILLIS).await?;
    let prior: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM visitors WHERE created_at >= ? AND created_at < ?",
    )
    .bind(now - 2 * WEEK_MILLIS)
    .bind(now - WEEK_MILLIS)
    .fetch_one(pool)
    .await?;

    if prior > 0 {
        Ok((recent - prior) as f64 / prior as f64 * 100.0)
    } else {
        Ok(0.0)
    }
}

fn count_and_rank(values: impl Iterator<Item = String>, limit: usize) -> Vec<(String, i64)> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, i64)> = counts.into_iter().collect();
    // Sort by descending count first, lexicographically as secondary sort.
    ranked.sort_unstable_by(|a, b| {
        let count_cmp = b.1.cmp(&a.1);
        if count_cmp == std::cmp::Ordering::Equal {
            a.0.cmp(&b.0)
        } else {
            count_cmp
        }
    });
    ranked.truncate(limit);
    ranked
}

/// Ranks the distinct values of one column across the most recent records.
///
/// # Arguments
///
/// * `field` - The column to group by
/// * `limit` - Maximum number of ranked entries to return
pub async fn grouped_counts(
    pool: &SqlitePool,
    field: GroupField,
    limit: usize,
) -> Result<Vec<(String, i64)>, DatabaseError> {
    let column = field.as_column();
    let sql = format!(
        "SELECT {column} FROM visitors WHERE {column} IS NOT NULL \
         ORDER BY created_at DESC LIMIT ?"
    );
    let values: Vec<String> = sqlx::query_scalar(&sql)
        .bind(REPORT_SCAN_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(count_and_rank(values.into_iter(), limit))
}

/// Geographic columns the per-country drill-down reports group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceField {
    /// First-level subdivision (state/region)
    Region,
    /// City
    City,
}

/// Ranks regions or cities within one country across the most recent
/// records carrying that country code.
pub async fn place_counts(
    pool: &SqlitePool,
    field: PlaceField,
    country: &str,
    limit: usize,
) -> Result<Vec<(String, i64)>, DatabaseError> {
    let column = match field {
        PlaceField::Region => "region",
        PlaceField::City => "city",
    };
    let sql = format!(
        "SELECT {column} FROM visitors \
         WHERE country_code = ? AND {column} IS NOT NULL \
         ORDER BY created_at DESC LIMIT ?"
    );
    let values: Vec<String> = sqlx::query_scalar(&sql)
        .bind(country)
        .bind(REPORT_SCAN_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(count_and_rank(values.into_iter(), limit))
}

/// Ranks browser name/version combinations across the most recent records.
pub async fn browser_version_counts(
    pool: &SqlitePool,
    limit: usize,
) -> Result<Vec<(String, i64)>, DatabaseError> {
    let rows: Vec<(Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT browser_name, browser_version FROM visitors \
         WHERE browser_name IS NOT NULL ORDER BY created_at DESC LIMIT ?",
    )
    .bind(REPORT_SCAN_LIMIT)
    .fetch_all(pool)
    .await?;

    let labels = rows.into_iter().map(|(name, version)| {
        let name = name.unwrap_or_else(|| "Unknown".to_string());
        match version {
            Some(version) => format!("{} {}", name, version),
            None => name,
        }
    });
    Ok(count_and_rank(labels, limit))
}

/// Ranks screen resolutions ("WxH") across the most recent records.
pub async fn screen_resolution_counts(
    pool: &SqlitePool,
    limit: usize,
) -> Result<Vec<(String, i64)>, DatabaseError> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT screen_width, screen_height FROM visitors \
         WHERE screen_width IS NOT NULL AND screen_height IS NOT NULL \
         ORDER BY created_at DESC LIMIT ?",
    )
    .bind(REPORT_SCAN_LIMIT)
    .fetch_all(pool)
    .await?;

    let labels = rows.into_iter().map(|(w, h)| format!("{}x{}", w, h));
    Ok(count_and_rank(labels, limit))
}

/// Daily visit counts for the trailing `days` window, oldest day first.
/// Days with no traffic are omitted rather than zero-filled.
pub async fn timeline(pool: &SqlitePool, days: i64) -> Result<Vec<(String, i64)>, DatabaseError> {
    let cutoff = chrono::Utc::now().timestamp_millis() - days * 24 * 60 * 60 * 1000;
    let timestamps: Vec<i64> =
        sqlx::query_scalar("SELECT created_at FROM visitors WHERE created_at >= ?")
            .bind(cutoff)
            .fetch_all(pool)
            .await?;

    let mut buckets: HashMap<String, i64> = HashMap::new();
    for millis in timestamps {
        if let Some(dt) = chrono::DateTime::from_timestamp_millis(millis) {
            *buckets.entry(dt.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
        }
    }

    let mut days: Vec<(String, i64)> = buckets.into_iter().collect();
    days.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    Ok(days)
}

/// Recent records carrying resolved coordinates, for the heatmap view.
pub async fn geo_heatmap(pool: &SqlitePool, limit: i64) -> Result<Vec<GeoPoint>, DatabaseError> {
    let rows: Vec<(f64, f64, Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT latitude, longitude, country_code, city FROM visitors \
         WHERE latitude IS NOT NULL AND longitude IS NOT NULL \
         ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(latitude, longitude, country_code, city)| GeoPoint {
            latitude,
            longitude,
            country_code,
            city,
        })
        .collect())
}

/// Record totals underlying the privacy report: how many records exist
/// and how many were stored under granted consent.
pub async fn privacy_counts(pool: &SqlitePool) -> Result<(i64, i64), DatabaseError> {
    let total = count_visitors(pool).await?;
    let consented: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE consent_granted = 1")
            .fetch_one(pool)
            .await?;
    Ok((total, consented))
}
