//! Heuristic threat scoring for inbound tracking requests.
//!
//! Three independent signal sources -- user agent string, source IP, and
//! the serialized payload -- each produce a score in `[0.0, 1.0]` with a
//! list of findings. The overall assessment is the arithmetic mean of the
//! three. Scoring is purely advisory: assessments are logged, never used
//! to reject a request, and scoring itself never fails.

pub mod ip;
pub mod patterns;
pub mod types;
pub mod user_agent;

use serde_json::Value;

pub use types::{ComponentAnalysis, RiskLevel, ThreatAssessment};

/// Produces a combined threat assessment for one request.
///
/// # Arguments
///
/// * `user_agent` - The request's user agent header, if present
/// * `ip` - The client's source IP address
/// * `payload` - The full request payload
pub fn assess_threat(user_agent: Option<&str>, ip: &str, payload: &Value) -> ThreatAssessment {
    let ua = user_agent::analyze_user_agent(user_agent);
    let ip_analysis = ip::analyze_ip(ip);
    let pattern_analysis = patterns::analyze_patterns(payload);

    let overall = (ua.score + ip_analysis.score + pattern_analysis.score) / 3.0;

    let mut threats = Vec::new();
    threats.extend(ua.threats.iter().cloned());
    threats.extend(ip_analysis.threats.iter().cloned());
    threats.extend(pattern_analysis.threats.iter().cloned());

    ThreatAssessment {
        overall_risk: RiskLevel::classify(overall),
        overall_score: (overall * 100.0).round() as u8,
        user_agent: ua,
        ip: ip_analysis,
        patterns: pattern_analysis,
        threats,
        timestamp: chrono::Utc::now(),
    }
}
