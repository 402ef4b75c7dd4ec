//! The field rule registry.
//!
//! One entry per recognized tracking field: declared type, required flag,
//! max length, numeric range, enumerated value set, and optional custom
//! validator/sanitizer handles. Fields without an entry pass through
//! validation unchanged -- this open-schema behavior is deliberate and
//! depended on by forward-compatible clients.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;

use super::sanitize::sanitize_string;
use super::validators::{
    is_valid_browser_name, is_valid_ip, is_valid_language_code, is_valid_os_name, is_valid_url,
};

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// JSON string
    String,
    /// Number, or a string coercible to a float
    Number,
}

/// Custom validator handle: returns `false` to reject the (string) value.
pub type Validator = fn(&str) -> bool;

/// Custom sanitizer handle: transforms a passing value before storage.
pub type Sanitizer = fn(&Value) -> Value;

/// Validation rule for a single field.
#[derive(Clone)]
pub struct FieldRule {
    /// Declared type; checked before all other constraints
    pub field_type: FieldType,
    /// Whether the field must be present and non-empty
    pub required: bool,
    /// Maximum string length in characters
    pub max_length: Option<usize>,
    /// Inclusive numeric minimum
    pub min: Option<f64>,
    /// Inclusive numeric maximum
    pub max: Option<f64>,
    /// Enumerated set of accepted values
    pub allowed: Option<&'static [&'static str]>,
    /// Custom format validator
    pub validator: Option<Validator>,
    /// Custom sanitizer (otherwise the type-default sanitizer applies)
    pub sanitizer: Option<Sanitizer>,
}

impl FieldRule {
    fn string() -> Self {
        FieldRule {
            field_type: FieldType::String,
            required: false,
            max_length: None,
            min: None,
            max: None,
            allowed: None,
            validator: None,
            sanitizer: None,
        }
    }

    fn number() -> Self {
        FieldRule {
            field_type: FieldType::Number,
            ..FieldRule::string()
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    fn validator(mut self, v: Validator) -> Self {
        self.validator = Some(v);
        self
    }

    fn sanitizer(mut self, s: Sanitizer) -> Self {
        self.sanitizer = Some(s);
        self
    }
}

fn sanitize_user_agent(value: &Value) -> Value {
    match value.as_str() {
        Some(s) => Value::String(sanitize_string(s)),
        None => Value::Null,
    }
}

/// Accepted device type values.
pub const DEVICE_TYPES: &[&str] = &["Mobile", "Tablet", "Desktop"];

/// The rule table, keyed by field name.
pub static RULES: LazyLock<HashMap<&'static str, FieldRule>> = LazyLock::new(|| {
    let mut rules = HashMap::new();
    rules.insert(
        "ip_address",
        FieldRule::string().required().validator(|v| is_valid_ip(v)),
    );
    rules.insert(
        "user_agent",
        FieldRule::string()
            .max_length(500)
            .sanitizer(sanitize_user_agent),
    );
    rules.insert(
        "browser_name",
        FieldRule::string()
            .max_length(50)
            .validator(|v| is_valid_browser_name(v)),
    );
    rules.insert("browser_version", FieldRule::string().max_length(50));
    rules.insert(
        "os_name",
        FieldRule::string()
            .max_length(50)
            .validator(|v| is_valid_os_name(v)),
    );
    rules.insert("device_type", FieldRule::string().allowed(DEVICE_TYPES));
    rules.insert("screen_width", FieldRule::number().range(0.0, 10000.0));
    rules.insert("screen_height", FieldRule::number().range(0.0, 10000.0));
    rules.insert("viewport_width", FieldRule::number().range(0.0, 10000.0));
    rules.insert("viewport_height", FieldRule::number().range(0.0, 10000.0));
    rules.insert("timezone_offset", FieldRule::number());
    rules.insert(
        "language",
        FieldRule::string()
            .max_length(10)
            .validator(|v| is_valid_language_code(v)),
    );
    rules.insert(
        "referrer",
        FieldRule::string()
            .max_length(1000)
            .validator(|v| is_valid_url(v)),
    );
    rules.insert(
        "page_visited",
        FieldRule::string()
            .max_length(1000)
            .validator(|v| is_valid_url(v)),
    );
    rules.insert("canvas_fingerprint", FieldRule::string().max_length(1000));
    rules.insert("audio_fingerprint", FieldRule::string().max_length(1000));
    rules.insert("webgl_renderer", FieldRule::string().max_length(200));
    rules.insert("touch_support", FieldRule::string().max_length(10));
    rules.insert(
        "hardware_concurrency",
        FieldRule::number().range(0.0, 1024.0),
    );
    rules.insert("color_depth", FieldRule::number().range(0.0, 1024.0));
    rules.insert("timezone", FieldRule::string().max_length(100));
    rules.insert("user_language", FieldRule::string().max_length(10));
    rules.insert("platform", FieldRule::string().max_length(50));
    rules
});
