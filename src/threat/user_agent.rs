//! User agent heuristics.
//!
//! Scores a user agent string against token lists for scraping clients and
//! known attack tools, plus a check for the markers every mainstream
//! browser carries. Matching is case-insensitive substring containment.

use crate::config::MISSING_USER_AGENT_SCORE;

use super::types::{ComponentAnalysis, RiskLevel};

const SUSPICIOUS_BROWSERS: [&str; 7] =
    ["curl", "wget", "python", "scrapy", "bot", "crawler", "spider"];

const ATTACK_TOOLS: [&str; 5] = ["sqlmap", "nikto", "nmap", "masscan", "metasploit"];

const MAINSTREAM_MARKERS: [&str; 4] = ["mozilla", "chrome", "safari", "firefox"];

/// Analyzes a user agent string, or its absence.
///
/// An absent or empty user agent yields a fixed score with `Unknown`
/// risk and no findings; there is no signal to score, only the fact
/// that the header is missing.
pub fn analyze_user_agent(user_agent: Option<&str>) -> ComponentAnalysis {
    let Some(user_agent) = user_agent.filter(|ua| !ua.is_empty()) else {
        return ComponentAnalysis {
            risk: RiskLevel::Unknown,
            score: MISSING_USER_AGENT_SCORE,
            threats: Vec::new(),
        };
    };

    let lowered = user_agent.to_lowercase();
    let mut score = 0.0;
    let mut threats = Vec::new();

    for token in SUSPICIOUS_BROWSERS {
        if lowered.contains(token) {
            score += 0.3;
            threats.push(format!("Suspicious browser: {}", token));
        }
    }

    for token in ATTACK_TOOLS {
        if lowered.contains(token) {
            score += 0.5;
            threats.push(format!("Known attack tool detected: {}", token));
        }
    }

    if !MAINSTREAM_MARKERS.iter().any(|m| lowered.contains(m)) {
        score += 0.2;
        threats.push("Non-standard user agent".to_string());
    }

    ComponentAnalysis::from_score(score, threats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainstream_browser_scores_zero() {
        let result = analyze_user_agent(Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
        ));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.risk, RiskLevel::Low);
        assert!(result.threats.is_empty());
    }

    #[test]
    fn test_curl_flagged_as_suspicious_and_nonstandard() {
        // curl matches a scraper token and lacks every mainstream marker.
        let result = analyze_user_agent(Some("curl/8.5.0"));
        assert!((result.score - 0.5).abs() < 1e-9);
        assert_eq!(result.risk, RiskLevel::Medium);
        assert_eq!(
            result.threats,
            vec!["Suspicious browser: curl", "Non-standard user agent"]
        );
    }

    #[test]
    fn test_attack_tool_detection() {
        let result = analyze_user_agent(Some("sqlmap/1.7#stable"));
        assert!(result
            .threats
            .contains(&"Known attack tool detected: sqlmap".to_string()));
        // 0.5 tool + 0.2 non-standard lands exactly on the high
        // threshold, which is strict: an attack tool alone is Medium.
        assert!((result.score - 0.7).abs() < 1e-9);
        assert_eq!(result.risk, RiskLevel::Medium);
    }

    #[test]
    fn test_token_hits_accumulate_and_clamp() {
        let result = analyze_user_agent(Some("python-scrapy spider bot crawler"));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.risk, RiskLevel::High);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let result = analyze_user_agent(Some("GoogleBot/2.1"));
        assert!(result
            .threats
            .contains(&"Suspicious browser: bot".to_string()));
    }

    #[test]
    fn test_absent_user_agent_is_unknown() {
        let result = analyze_user_agent(None);
        assert_eq!(result.risk, RiskLevel::Unknown);
        assert_eq!(result.score, MISSING_USER_AGENT_SCORE);
        assert!(result.threats.is_empty());
    }

    #[test]
    fn test_empty_user_agent_is_treated_as_absent() {
        let result = analyze_user_agent(Some(""));
        assert_eq!(result.risk, RiskLevel::Unknown);
        assert_eq!(result.score, MISSING_USER_AGENT_SCORE);
        assert!(result.threats.is_empty());
    }
}
