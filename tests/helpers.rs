// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use sqlx::SqlitePool;

use visitor_pulse::run_migrations;
use visitor_pulse::storage::VisitorRow;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Builds a visitor row with plausible defaults, ready to customize.
#[allow(dead_code)] // Used by other test files
pub fn sample_row() -> VisitorRow {
    VisitorRow {
        ip_address: "203.0.113.0".to_string(),
        user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0".to_string()),
        browser_name: Some("Firefox".to_string()),
        browser_version: Some("121.0".to_string()),
        os_name: Some("Linux".to_string()),
        device_type: Some("Desktop".to_string()),
        screen_width: Some(1920),
        screen_height: Some(1080),
        language: Some("en-US".to_string()),
        page_visited: Some("https://example.com/".to_string()),
        consent_granted: true,
        created_at: chrono::Utc::now().timestamp_millis(),
        ..VisitorRow::default()
    }
}
