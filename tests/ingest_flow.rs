// End-to-end ingest pipeline tests against an in-memory database.

mod helpers;

use serde_json::{json, Map, Value};

use visitor_pulse::ingest::{ingest_record, IngestOutcome};
use visitor_pulse::privacy::ConsentState;

use helpers::create_test_pool;

fn payload(value: Value) -> Map<String, Value> {
    value.as_object().expect("payload is an object").clone()
}

#[tokio::test]
async fn test_valid_record_is_stored_with_anonymized_ip() {
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    let record = payload(json!({
        "user_agent": "Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0",
        "browser_name": "Firefox",
        "device_type": "Desktop",
        "screen_width": 1920,
        "screen_height": 1080,
        "language": "en-US",
        "page_visited": "https://example.com/pricing"
    }));

    let outcome = ingest_record(&pool, &consent, &record, "203.0.113.45")
        .await
        .expect("ingest should succeed");
    let id = match outcome {
        IngestOutcome::Recorded { id } => id,
        other => panic!("expected Recorded, got {:?}", other),
    };

    let (ip, page): (String, Option<String>) =
        sqlx::query_as("SELECT ip_address, page_visited FROM visitors WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .expect("row should exist");
    assert_eq!(ip, "203.0.113.0");
    assert_eq!(page.as_deref(), Some("https://example.com/pricing"));
}

#[tokio::test]
async fn test_client_supplied_ip_is_overridden() {
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    let record = payload(json!({
        "ip_address": "8.8.8.8",
        "browser_name": "Chrome"
    }));

    let outcome = ingest_record(&pool, &consent, &record, "198.51.100.7")
        .await
        .expect("ingest should succeed");
    assert!(matches!(outcome, IngestOutcome::Recorded { .. }));

    let ip: String = sqlx::query_scalar("SELECT ip_address FROM visitors")
        .fetch_one(&pool)
        .await
        .expect("row should exist");
    assert_eq!(ip, "198.51.100.0");
}

#[tokio::test]
async fn test_invalid_record_is_rejected_and_not_stored() {
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    let record = payload(json!({
        "device_type": "Phone",
        "screen_width": 99999
    }));

    let outcome = ingest_record(&pool, &consent, &record, "203.0.113.45")
        .await
        .expect("ingest should not error on validation failure");
    let errors = match outcome {
        IngestOutcome::Rejected { errors } => errors,
        other => panic!("expected Rejected, got {:?}", other),
    };
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .any(|e| e.contains("device_type")));
    assert!(errors
        .iter()
        .any(|e| e.contains("screen_width")));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors")
        .fetch_one(&pool)
        .await
        .expect("count query");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_withdrawn_consent_drops_record() {
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    consent.set(false);
    let record = payload(json!({"browser_name": "Firefox"}));

    let outcome = ingest_record(&pool, &consent, &record, "203.0.113.45")
        .await
        .expect("ingest should succeed");
    assert!(matches!(outcome, IngestOutcome::ConsentWithheld));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitors")
        .fetch_one(&pool)
        .await
        .expect("count query");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_consent_restored_resumes_collection() {
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    consent.set(false);
    consent.set(true);
    let record = payload(json!({"browser_name": "Firefox"}));

    let outcome = ingest_record(&pool, &consent, &record, "203.0.113.45")
        .await
        .expect("ingest should succeed");
    assert!(matches!(outcome, IngestOutcome::Recorded { .. }));
}

#[tokio::test]
async fn test_hostile_payload_is_still_stored_after_sanitization() {
    // Threat scoring is advisory; a record that survives validation is
    // stored with dangerous fragments stripped.
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    let record = payload(json!({
        "user_agent": "Mozilla/5.0 <script>alert(1)</script>",
        "browser_name": "Firefox"
    }));

    let outcome = ingest_record(&pool, &consent, &record, "203.0.113.45")
        .await
        .expect("ingest should succeed");
    assert!(matches!(outcome, IngestOutcome::Recorded { .. }));

    let ua: Option<String> = sqlx::query_scalar("SELECT user_agent FROM visitors")
        .fetch_one(&pool)
        .await
        .expect("row should exist");
    assert_eq!(ua.as_deref(), Some("Mozilla/5.0"));
}

#[tokio::test]
async fn test_ipv6_client_address_is_truncated() {
    let pool = create_test_pool().await;
    let consent = ConsentState::new();
    let record = payload(json!({"browser_name": "Safari"}));

    ingest_record(
        &pool,
        &consent,
        &record,
        "2001:0db8:85a3:0001:0000:8a2e:0370:7334",
    )
    .await
    .expect("ingest should succeed");

    let ip: String = sqlx::query_scalar("SELECT ip_address FROM visitors")
        .fetch_one(&pool)
        .await
        .expect("row should exist");
    assert_eq!(ip, "2001:0db8:85a3:0001:0:0:0:0");
}
