//! Per-field format validators.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$")
        .expect("valid regex")
});

static IPV6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$|^::1$|^::$").expect("valid regex")
});

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{2,3}(-[a-zA-Z]{2,3})?$").expect("valid regex"));

/// Validates an IP address string.
///
/// Accepts dotted-quad IPv4 (each octet 0-255) and a simplified IPv6 form:
/// eight colon-separated hex groups, or the literals `::1` / `::`.
///
/// Known limitation: mid-string `::` compression (e.g. `2001:db8::1`) is
/// rejected. The narrower acceptance set is deliberate; existing consumers
/// depend on it.
pub fn is_valid_ip(ip: &str) -> bool {
    if ip.is_empty() {
        return false;
    }
    IPV4.is_match(ip) || IPV6.is_match(ip)
}

/// Validates that a string parses as an absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Validates a language code: 2-3 letters, optionally `-` plus 2-3 letters.
pub fn is_valid_language_code(code: &str) -> bool {
    LANGUAGE_CODE.is_match(code)
}

/// Recognized browser names (anything else is an enum-style violation).
const VALID_BROWSERS: &[&str] = &["Chrome", "Firefox", "Safari", "Edge", "Opera", "IE", "Unknown"];

/// Recognized operating system names.
const VALID_OS: &[&str] = &["Windows", "MacOS", "Linux", "Android", "iOS", "Unknown"];

/// Validates a reported browser name against the recognized set.
pub fn is_valid_browser_name(name: &str) -> bool {
    VALID_BROWSERS.contains(&name)
}

/// Validates a reported OS name against the recognized set.
pub fn is_valid_os_name(name: &str) -> bool {
    VALID_OS.contains(&name)
}
