//! Fixed-window request rate limiting.
//!
//! Tracks request counts per client IP over a fixed window. A client's
//! first request opens its window; requests past the cap inside the
//! window are rejected until the window expires and resets. Stale
//! entries are pruned opportunistically on each check.

use std::collections::HashMap;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::config::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW};

/// Per-IP fixed-window rate limiter.
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, (Instant, u32)>>,
}

impl FixedWindowLimiter {
    /// Creates an empty limiter.
    pub fn new() -> FixedWindowLimiter {
        FixedWindowLimiter {
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request from `ip` and returns whether it is allowed.
    pub async fn check(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        windows.retain(|_, (start, _)| now.duration_since(*start) < RATE_LIMIT_WINDOW);

        let (start, count) = windows.entry(ip.to_string()).or_insert((now, 0));
        if now.duration_since(*start) >= RATE_LIMIT_WINDOW {
            *start = now;
            *count = 0;
        }
        *count += 1;
        *count <= RATE_LIMIT_MAX_REQUESTS
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        FixedWindowLimiter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requests_under_cap_are_allowed() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..RATE_LIMIT_MAX_REQUESTS {
            assert!(limiter.check("203.0.113.1").await);
        }
    }

    #[tokio::test]
    async fn test_request_over_cap_is_rejected() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..RATE_LIMIT_MAX_REQUESTS {
            limiter.check("203.0.113.1").await;
        }
        assert!(!limiter.check("203.0.113.1").await);
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..=RATE_LIMIT_MAX_REQUESTS {
            limiter.check("203.0.113.1").await;
        }
        assert!(!limiter.check("203.0.113.1").await);
        assert!(limiter.check("203.0.113.2").await);
    }
}
