//! Privacy controls: IP anonymization, consent gating, and retention.
//!
//! Anonymization is irreversible truncation applied before persistence;
//! the full address never reaches the database. Consent is a single
//! global flag consulted at ingest time -- flipping it off stops new
//! records but does not erase existing ones.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use crate::config::RETENTION_DAYS;

/// Anonymizes an IP address by truncation.
///
/// IPv4 addresses get their fourth octet zeroed; colon-separated IPv6
/// addresses keep their first four groups and zero the rest. Anything
/// that fits neither shape is returned unchanged, including compressed
/// forms like `::1` which have no explicit fourth group.
pub fn anonymize_ip(ip: &str) -> String {
    let dotted: Vec<&str> = ip.split('.').collect();
    if dotted.len() == 4 {
        return format!("{}.{}.{}.0", dotted[0], dotted[1], dotted[2]);
    }
    if ip.contains(':') {
        let groups: Vec<&str> = ip.split(':').collect();
        if groups.len() > 4 {
            return groups
                .iter()
                .enumerate()
                .map(|(i, g)| if i >= 4 { "0" } else { *g })
                .collect::<Vec<&str>>()
                .join(":");
        }
    }
    ip.to_string()
}

/// Global consent flag shared across request handlers.
///
/// Defaults to granted so that a fresh deployment collects data until the
/// operator explicitly withdraws consent.
#[derive(Debug)]
pub struct ConsentState {
    inner: RwLock<ConsentInner>,
}

#[derive(Debug, Clone)]
struct ConsentInner {
    granted: bool,
    updated_at: DateTime<Utc>,
}

impl ConsentState {
    /// Creates a consent state with collection enabled.
    pub fn new() -> ConsentState {
        ConsentState {
            inner: RwLock::new(ConsentInner {
                granted: true,
                updated_at: Utc::now(),
            }),
        }
    }

    /// Returns whether collection is currently consented.
    pub fn granted(&self) -> bool {
        match self.inner.read() {
            Ok(guard) => guard.granted,
            // A poisoned lock means a writer panicked mid-update; fail
            // closed and stop collecting.
            Err(_) => false,
        }
    }

    /// Records a consent decision.
    pub fn set(&self, granted: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.granted = granted;
            guard.updated_at = Utc::now();
        }
    }

    /// Returns when consent was last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        match self.inner.read() {
            Ok(guard) => guard.updated_at,
            Err(_) => Utc::now(),
        }
    }
}

impl Default for ConsentState {
    fn default() -> Self {
        ConsentState::new()
    }
}

/// The retention window applied to stored records.
pub fn retention_window() -> Duration {
    Duration::days(RETENTION_DAYS)
}

/// Returns whether a record timestamp falls inside the retention window.
pub fn is_within_retention(created_at: DateTime<Utc>) -> bool {
    Utc::now() - created_at <= retention_window()
}
