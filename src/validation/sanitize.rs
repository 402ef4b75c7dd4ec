//! Default field sanitizers.
//!
//! String sanitization removes potentially dangerous markup before a value is
//! stored: `<script>` and `<iframe>` blocks, `javascript:`/`vbscript:` URI
//! prefixes, and inline `on<event>=` handler attributes. Sanitization is
//! idempotent: a string with none of those patterns comes back unchanged.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid regex"));
static IFRAME_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe>").expect("valid regex"));
static JAVASCRIPT_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));
static VBSCRIPT_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vbscript:").expect("valid regex"));
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").expect("valid regex"));

/// Strips dangerous markup from a string and trims surrounding whitespace.
pub fn sanitize_string(input: &str) -> String {
    let cleaned = SCRIPT_BLOCK.replace_all(input, "");
    let cleaned = IFRAME_BLOCK.replace_all(&cleaned, "");
    let cleaned = JAVASCRIPT_URI.replace_all(&cleaned, "");
    let cleaned = VBSCRIPT_URI.replace_all(&cleaned, "");
    let cleaned = EVENT_HANDLER.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

/// Parses a JSON value as a float, accepting numbers and numeric strings.
///
/// Returns `None` for anything that cannot be coerced (the caller stores
/// null in that case).
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Default number sanitizer: coerce to a float, or null when not coercible.
pub fn sanitize_number(value: &Value) -> Value {
    match parse_number(value).and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::Null,
    }
}
