//! Server data structures.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::privacy::ConsentState;

use super::rate_limit::FixedWindowLimiter;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: Arc<SqlitePool>,
    /// Global consent flag
    pub consent: Arc<ConsentState>,
    /// Per-IP request rate limiter
    pub rate_limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    /// Builds the shared state from its components.
    pub fn new(pool: Arc<SqlitePool>, consent: Arc<ConsentState>) -> AppState {
        AppState {
            pool,
            consent,
            rate_limiter: Arc::new(FixedWindowLimiter::new()),
        }
    }
}
