//! Source IP heuristics.
//!
//! Flags private/loopback ranges (unexpected for a public collector) and a
//! coarse textual prefix list approximating major datacenter and VPS
//! address space. The prefix list trades precision for zero lookups; a
//! full ASN database is out of scope here.

use super::types::ComponentAnalysis;

/// Textual prefixes covering common cloud provider ranges. Deliberately
/// coarse: `"52."` matches far more than AWS, which is acceptable for an
/// advisory score but would not be for a blocklist.
const DATACENTER_PREFIXES: [&str; 9] = [
    "102.159.", "37.3.", "52.", "54.", "35.", "104.", "34.", "40.", "13.",
];

/// Returns `true` for RFC 1918, loopback, and IPv6 unique-local/loopback
/// addresses, judged textually.
pub fn is_private_ip(ip: &str) -> bool {
    if ip.starts_with("10.") || ip.starts_with("192.168.") || ip.starts_with("127.") {
        return true;
    }
    if let Some(rest) = ip.strip_prefix("172.") {
        if let Some(second) = rest.split('.').next() {
            if let Ok(octet) = second.parse::<u8>() {
                if (16..=31).contains(&octet) {
                    return true;
                }
            }
        }
    }
    ip == "::1" || ip.to_lowercase().starts_with("fc00:")
}

/// Analyzes a source IP address.
pub fn analyze_ip(ip: &str) -> ComponentAnalysis {
    let mut score = 0.0;
    let mut threats = Vec::new();

    if is_private_ip(ip) {
        score += 0.1;
        threats.push("Private IP address".to_string());
    }

    if DATACENTER_PREFIXES.iter().any(|p| ip.starts_with(p)) {
        score += 0.4;
        threats.push("Datacenter/VPS IP detected".to_string());
    }

    ComponentAnalysis::from_score(score, threats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threat::types::RiskLevel;

    #[test]
    fn test_public_residential_ip_scores_zero() {
        let result = analyze_ip("203.0.113.45");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.risk, RiskLevel::Low);
        assert!(result.threats.is_empty());
    }

    #[test]
    fn test_private_ranges_detected() {
        for ip in ["10.0.0.5", "192.168.1.1", "127.0.0.1", "172.16.0.9", "172.31.255.1", "::1", "fc00::1", "FC00::2"] {
            assert!(is_private_ip(ip), "{} should be private", ip);
        }
    }

    #[test]
    fn test_172_range_bounds() {
        assert!(!is_private_ip("172.15.0.1"));
        assert!(!is_private_ip("172.32.0.1"));
    }

    #[test]
    fn test_private_ip_score() {
        let result = analyze_ip("10.0.0.5");
        assert!((result.score - 0.1).abs() < 1e-9);
        assert_eq!(result.threats, vec!["Private IP address"]);
    }

    #[test]
    fn test_datacenter_prefix_detection() {
        let result = analyze_ip("52.14.9.200");
        assert!((result.score - 0.4).abs() < 1e-9);
        assert_eq!(result.threats, vec!["Datacenter/VPS IP detected"]);
        assert_eq!(result.risk, RiskLevel::Low);
    }

    #[test]
    fn test_prefix_match_is_textual() {
        // "13." matches only as a leading prefix.
        assert!(analyze_ip("13.55.0.1").score > 0.0);
        assert_eq!(analyze_ip("213.55.0.1").score, 0.0);
    }
}
