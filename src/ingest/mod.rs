//! The ingest pipeline for tracking records.
//!
//! Each inbound record flows through a fixed sequence: threat assessment
//! (advisory, logged only), validation and sanitization, the consent
//! gate, GeoIP enrichment on the real client address, IP anonymization,
//! and finally insertion. Ordering matters: enrichment must see the full
//! address, storage must never see it.

use serde_json::{Map, Value};
use sqlx::SqlitePool;

use crate::error_handling::IngestError;
use crate::geoip;
use crate::privacy::{anonymize_ip, ConsentState};
use crate::storage::{insert_visitor, VisitorRow};
use crate::threat::{assess_threat, RiskLevel};
use crate::validation::{validate_and_sanitize, ValidationResult};

/// Outcome of one ingest attempt.
#[derive(Debug)]
pub enum IngestOutcome {
    /// The record was validated, enriched, and stored.
    Recorded {
        /// Row id of the stored record
        id: i64,
    },
    /// Consent is withdrawn; the record was discarded after validation.
    ConsentWithheld,
    /// Validation failed; nothing was stored.
    Rejected {
        /// One message per field violation
        errors: Vec<String>,
    },
}

fn take_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn take_int(map: &Map<String, Value>, key: &str) -> Option<i64> {
    map.get(key).and_then(Value::as_f64).map(|n| n as i64)
}

fn build_row(sanitized: &Map<String, Value>, anonymized_ip: String) -> VisitorRow {
    VisitorRow {
        ip_address: anonymized_ip,
        user_agent: take_str(sanitized, "user_agent"),
        browser_name: take_str(sanitized, "browser_name"),
        browser_version: take_str(sanitized, "browser_version"),
        os_name: take_str(sanitized, "os_name"),
        device_type: take_str(sanitized, "device_type"),
        screen_width: take_int(sanitized, "screen_width"),
        screen_height: take_int(sanitized, "screen_height"),
        viewport_width: take_int(sanitized, "viewport_width"),
        viewport_height: take_int(sanitized, "viewport_height"),
        timezone_offset: take_int(sanitized, "timezone_offset"),
        language: take_str(sanitized, "language"),
        referrer: take_str(sanitized, "referrer"),
        page_visited: take_str(sanitized, "page_visited"),
        canvas_fingerprint: take_str(sanitized, "canvas_fingerprint"),
        audio_fingerprint: take_str(sanitized, "audio_fingerprint"),
        webgl_renderer: take_str(sanitized, "webgl_renderer"),
        touch_support: take_str(sanitized, "touch_support"),
        hardware_concurrency: take_int(sanitized, "hardware_concurrency"),
        color_depth: take_int(sanitized, "color_depth"),
        timezone: take_str(sanitized, "timezone"),
        user_language: take_str(sanitized, "user_language"),
        platform: take_str(sanitized, "platform"),
        consent_granted: true,
        created_at: chrono::Utc::now().timestamp_millis(),
        ..VisitorRow::default()
    }
}

/// Runs one tracking record through the full ingest pipeline.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `consent` - Global consent state consulted after validation
/// * `payload` - The client-supplied record; `ip_address` is overwritten
///   with `client_ip` before validation so clients cannot spoof it
/// * `client_ip` - The connection's source address
pub async fn ingest_record(
    pool: &SqlitePool,
    consent: &ConsentState,
    payload: &Map<String, Value>,
    client_ip: &str,
) -> Result<IngestOutcome, IngestError> {
    let mut record = payload.clone();
    record.insert(
        "ip_address".to_string(),
        Value::String(client_ip.to_string()),
    );

    let user_agent = payload.get("user_agent").and_then(Value::as_str);
    let assessment = assess_threat(user_agent, client_ip, &Value::Object(record.clone()));
    match assessment.overall_risk {
        RiskLevel::High | RiskLevel::Medium => {
            log::warn!(
                "Elevated threat score {} ({}) from {}: {}",
                assessment.overall_score,
                assessment.overall_risk,
                client_ip,
                assessment.threats.join("; ")
            );
        }
        RiskLevel::Low | RiskLevel::Unknown => {}
    }

    let sanitized = match validate_and_sanitize(&record) {
        ValidationResult::Valid { sanitized } => sanitized,
        ValidationResult::Invalid { errors } => {
            log::debug!("Rejected tracking record from {}: {:?}", client_ip, errors);
            return Ok(IngestOutcome::Rejected { errors });
        }
    };

    if !consent.granted() {
        log::debug!("Consent withdrawn; dropping record from {}", client_ip);
        return Ok(IngestOutcome::ConsentWithheld);
    }

    // Geo enrichment sees the real address; only the anonymized form is
    // stored alongside the result.
    let geo = geoip::lookup_ip(client_ip);
    let mut row = build_row(&sanitized, anonymize_ip(client_ip));
    if let Some(geo) = geo {
        row.country_code = geo.country_code;
        row.region = geo.region;
        row.city = geo.city;
        row.latitude = geo.latitude;
        row.longitude = geo.longitude;
    }

    let id = insert_visitor(pool, &row).await?;
    log::info!("Recorded visitor {} from {}", id, row.ip_address);
    Ok(IngestOutcome::Recorded { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().expect("test payload is an object").clone()
    }

    #[test]
    fn test_build_row_maps_sanitized_fields() {
        let sanitized = payload(json!({
            "user_agent": "Mozilla/5.0",
            "device_type": "Desktop",
            "screen_width": 1920.0,
            "hardware_concurrency": 8.0,
            "language": "en-US"
        }));
        let row = build_row(&sanitized, "203.0.113.0".to_string());
        assert_eq!(row.ip_address, "203.0.113.0");
        assert_eq!(row.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(row.screen_width, Some(1920));
        assert_eq!(row.hardware_concurrency, Some(8));
        assert!(row.consent_granted);
        assert!(row.created_at > 0);
    }

    #[test]
    fn test_build_row_absent_fields_are_none() {
        let row = build_row(&Map::new(), "203.0.113.0".to_string());
        assert!(row.browser_name.is_none());
        assert!(row.latitude.is_none());
        assert!(row.country_code.is_none());
    }
}
