//! Threat assessment result types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

use crate::config::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// Risk classification derived from a heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    /// Score at or below the medium threshold
    Low,
    /// Score above the medium threshold
    Medium,
    /// Score above the high threshold
    High,
    /// No signal available to score (e.g. user agent absent)
    Unknown,
}

impl RiskLevel {
    /// Classifies a clamped score against the fixed thresholds.
    pub fn classify(score: f64) -> RiskLevel {
        if score > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score > MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Score and findings for one signal source (user agent, source IP, or
/// payload content).
#[derive(Debug, Clone, Serialize)]
pub struct ComponentAnalysis {
    /// Risk classification for this component alone
    pub risk: RiskLevel,
    /// Component score, clamped to `[0.0, 1.0]`
    pub score: f64,
    /// Human-readable findings that contributed to the score
    pub threats: Vec<String>,
}

impl ComponentAnalysis {
    /// Builds a component from accumulated raw score and findings,
    /// clamping the score and classifying it.
    pub fn from_score(score: f64, threats: Vec<String>) -> ComponentAnalysis {
        let score = score.clamp(0.0, 1.0);
        ComponentAnalysis {
            risk: RiskLevel::classify(score),
            score,
            threats,
        }
    }
}

/// Combined threat assessment for one inbound tracking request.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatAssessment {
    /// Classification of the mean component score
    pub overall_risk: RiskLevel,
    /// Mean component score scaled to `0..=100` and rounded
    pub overall_score: u8,
    /// User agent analysis
    pub user_agent: ComponentAnalysis,
    /// Source IP analysis
    pub ip: ComponentAnalysis,
    /// Payload content analysis
    pub patterns: ComponentAnalysis,
    /// All findings in component order (user agent, IP, payload)
    pub threats: Vec<String>,
    /// When the assessment was produced
    pub timestamp: DateTime<Utc>,
}
