//! Payload content heuristics.
//!
//! Serializes the full request payload to JSON text and scans it for
//! injection signatures. Each signature family contributes its weight at
//! most once per payload regardless of how many fields match.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::types::ComponentAnalysis;

static SQL_INJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b(union|select|insert|delete|update|drop|create|alter|exec|execute)\b)|(-{2}|/\*|\*/|;)",
    )
    .expect("SQL injection pattern is valid")
});

static XSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<script|javascript:|onerror=|onload=").expect("XSS pattern is valid")
});

static PATH_TRAVERSAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\./").expect("path traversal pattern is valid"));

/// Scans a payload for injection signatures.
pub fn analyze_patterns(payload: &Value) -> ComponentAnalysis {
    // Scanning the serialized form covers nested values and keys alike.
    let text = payload.to_string();
    let mut score = 0.0;
    let mut threats = Vec::new();

    if SQL_INJECTION.is_match(&text) {
        score += 0.8;
        threats.push("SQL injection pattern detected".to_string());
    }
    if XSS.is_match(&text) {
        score += 0.7;
        threats.push("XSS pattern detected".to_string());
    }
    if PATH_TRAVERSAL.is_match(&text) {
        score += 0.6;
        threats.push("Path traversal pattern detected".to_string());
    }

    ComponentAnalysis::from_score(score, threats)
}
