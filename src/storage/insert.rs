//! Visitor record insertion.

use log::error;
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

use super::models::VisitorRow;

/// Inserts a visitor record and returns its row id.
pub async fn insert_visitor(pool: &SqlitePool, row: &VisitorRow) -> Result<i64, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO visitors (\
                ip_address, \
                user_agent, \
                browser_name, \
                browser_version, \
                os_name, \
                device_type, \
                screen_width, \
                screen_height, \
                viewport_width, \
                viewport_height, \
                timezone_offset, \
                language, \
                referrer, \
                page_visited, \
                country_code, \
                region, \
                city, \
                latitude, \
                longitude, \
                canvas_fingerprint, \
                audio_fingerprint, \
                webgl_renderer, \
                touch_support, \
                hardware_concurrency, \
                color_depth, \
                timezone, \
                user_language, \
                platform, \
                consent_granted, \
                created_at\
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&row.ip_address)
    .bind(&row.user_agent)
    .bind(&row.browser_name)
    .bind(&row.browser_version)
    .bind(&row.os_name)
    .bind(&row.device_type)
    .bind(row.screen_width)
    .bind(row.screen_height)
    .bind(row.viewport_width)
    .bind(row.viewport_height)
    .bind(row.timezone_offset)
    .bind(&row.language)
    .bind(&row.referrer)
    .bind(&row.page_visited)
    .bind(&row.country_code)
    .bind(&row.region)
    .bind(&row.city)
    .bind(row.latitude)
    .bind(row.longitude)
    .bind(&row.canvas_fingerprint)
    .bind(&row.audio_fingerprint)
    .bind(&row.webgl_renderer)
    .bind(&row.touch_support)
    .bind(row.hardware_concurrency)
    .bind(row.color_depth)
    .bind(&row.timezone)
    .bind(&row.user_language)
    .bind(&row.platform)
    .bind(row.consent_granted)
    .bind(row.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        error!("Error when accessing the database: {}", e);
        DatabaseError::SqlError(e)
    })?;

    Ok(result.last_insert_rowid())
}
