//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including rate limits, scoring thresholds, and query limits.

use std::time::Duration;

/// Default SQLite database path
pub const DB_PATH: &str = "./visitor_pulse.db";

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum accepted JSON request body size in bytes (10MB)
pub const MAX_JSON_BODY_BYTES: usize = 10 * 1024 * 1024;

// Rate limiting
/// Fixed rate-limit window duration (15 minutes)
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);
/// Maximum requests per client IP per window
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 100;

// Threat scoring thresholds
/// Scores above this are classified `High`
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Scores above this (and at or below the high threshold) are `Medium`
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;
/// Fixed score assigned when the user agent is absent entirely
pub const MISSING_USER_AGENT_SCORE: f64 = 0.2;

// Reporting
/// How many recent rows each frequency report scans before counting.
/// Reports are "recent top-N", not a full-table aggregation.
pub const REPORT_SCAN_LIMIT: i64 = 100;
/// Default number of grouping keys returned by a report
pub const DEFAULT_REPORT_LIMIT: usize = 10;
/// Maximum grouping keys a caller may request via `limit`
pub const MAX_REPORT_LIMIT: usize = 100;
/// Number of branded browser/version pairs in the version report
pub const BROWSER_VERSION_REPORT_LIMIT: usize = 20;
/// Maximum points returned by the geo heatmap report
pub const GEO_HEATMAP_LIMIT: i64 = 1000;
/// Default day span for the visitor timeline report
pub const DEFAULT_TIMELINE_DAYS: i64 = 30;

// Privacy
/// Data retention window in days (2 years)
pub const RETENTION_DAYS: i64 = 2 * 365;
