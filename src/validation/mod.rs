//! Tracking record validation and sanitization.
//!
//! Validates an inbound telemetry record (a flat field-name-to-value
//! mapping) against the fixed rule table in [`rules`], producing a
//! [`ValidationResult`]: either a fully sanitized mapping or the complete
//! list of field violations. A record failing any check is rejected
//! wholesale -- there is no partial accept -- but checks short-circuit per
//! field, not per record, so the error list names every failing field.

pub mod rules;
pub mod sanitize;
pub mod validators;

use serde_json::{Map, Value};

use rules::{FieldType, RULES};
use sanitize::{parse_number, sanitize_number, sanitize_string};

/// Outcome of validating one tracking record.
///
/// Constructed fresh per request and discarded after the response is sent;
/// never persisted.
#[derive(Debug)]
pub enum ValidationResult {
    /// Every field passed; carries the sanitized field mapping.
    Valid {
        /// Sanitized field values, same key set as the input
        sanitized: Map<String, Value>,
    },
    /// One or more fields failed; carries one message per failing field.
    Invalid {
        /// Human-readable error messages, one per violation
        errors: Vec<String>,
    },
}

impl ValidationResult {
    /// Returns `true` when the record passed all checks.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }
}

fn is_missing(value: &Value) -> bool {
    value.is_null() || value.as_str().is_some_and(|s| s.is_empty())
}

/// Validates and sanitizes a tracking record.
///
/// Processing order per field (later checks run only if earlier ones pass):
/// unknown-field passthrough, required, missing-optional passthrough, type,
/// max length, numeric range, enumerated set, custom validator, then
/// sanitization (custom sanitizer if declared, else the type default).
///
/// Required fields absent from the mapping entirely are also reported.
pub fn validate_and_sanitize(data: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut sanitized = Map::new();

    for (field, value) in data {
        let Some(rule) = RULES.get(field.as_str()) else {
            // Unknown fields pass through unvalidated: open-schema policy
            // for forward-compatible clients.
            sanitized.insert(field.clone(), value.clone());
            continue;
        };

        if rule.required && is_missing(value) {
            errors.push(format!("Field '{}' is required", field));
            continue;
        }

        if is_missing(value) {
            sanitized.insert(field.clone(), value.clone());
            continue;
        }

        match rule.field_type {
            FieldType::String => {
                if !value.is_string() {
                    errors.push(format!("Field '{}' must be a string", field));
                    continue;
                }
            }
            FieldType::Number => {
                if parse_number(value).is_none() {
                    errors.push(format!("Field '{}' must be a number", field));
                    continue;
                }
            }
        }

        if let (Some(max_length), Some(s)) = (rule.max_length, value.as_str()) {
            if s.chars().count() > max_length {
                errors.push(format!(
                    "Field '{}' exceeds maximum length of {}",
                    field, max_length
                ));
                continue;
            }
        }

        if rule.field_type == FieldType::Number {
            // Type check above guarantees this parses.
            let number = parse_number(value).unwrap_or(0.0);
            if let Some(min) = rule.min {
                if number < min {
                    errors.push(format!("Field '{}' must be at least {}", field, min));
                    continue;
                }
            }
            if let Some(max) = rule.max {
                if number > max {
                    errors.push(format!("Field '{}' must be at most {}", field, max));
                    continue;
                }
            }
        }

        if let Some(allowed) = rule.allowed {
            let member = value.as_str().is_some_and(|s| allowed.contains(&s));
            if !member {
                errors.push(format!(
                    "Field '{}' must be one of [{}]",
                    field,
                    allowed.join(", ")
                ));
                continue;
            }
        }

        if let (Some(validator), Some(s)) = (rule.validator, value.as_str()) {
            if !validator(s) {
                errors.push(format!("Field '{}' failed validation", field));
                continue;
            }
        }

        let clean = if let Some(sanitizer) = rule.sanitizer {
            sanitizer(value)
        } else {
            match rule.field_type {
                FieldType::String => match value.as_str() {
                    Some(s) => Value::String(sanitize_string(s)),
                    None => Value::Null,
                },
                FieldType::Number => sanitize_number(value),
            }
        };
        sanitized.insert(field.clone(), clean);
    }

    // Required fields missing from the mapping entirely.
    for (field, rule) in RULES.iter() {
        if rule.required && !data.contains_key(*field) {
            errors.push(format!("Field '{}' is required", field));
        }
    }

    if errors.is_empty() {
        ValidationResult::Valid { sanitized }
    } else {
        ValidationResult::Invalid { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().expect("test record is an object").clone()
    }

    fn errors_of(result: ValidationResult) -> Vec<String> {
        match result {
            ValidationResult::Invalid { errors } => errors,
            ValidationResult::Valid { .. } => panic!("expected invalid result"),
        }
    }

    #[test]
    fn test_valid_record_passes_with_sanitized_values() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "user_agent": "  Mozilla/5.0 (X11; Linux x86_64)  ",
            "browser_name": "Firefox",
            "device_type": "Desktop",
            "screen_width": 1920,
            "language": "en-US"
        }));
        match validate_and_sanitize(&data) {
            ValidationResult::Valid { sanitized } => {
                assert_eq!(
                    sanitized["user_agent"],
                    json!("Mozilla/5.0 (X11; Linux x86_64)")
                );
                assert_eq!(sanitized["screen_width"], json!(1920.0));
                assert_eq!(sanitized["ip_address"], json!("203.0.113.45"));
            }
            ValidationResult::Invalid { errors } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let data = record(json!({"browser_name": "Chrome"}));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(errors, vec!["Field 'ip_address' is required"]);
    }

    #[test]
    fn test_present_but_empty_required_field_is_reported() {
        let data = record(json!({"ip_address": ""}));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(errors, vec!["Field 'ip_address' is required"]);
    }

    #[test]
    fn test_unknown_fields_pass_through_unchanged() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "future_field": "<script>kept as-is</script>"
        }));
        match validate_and_sanitize(&data) {
            ValidationResult::Valid { sanitized } => {
                // No sanitization for unrecognized fields: deliberate
                // open-schema passthrough.
                assert_eq!(
                    sanitized["future_field"],
                    json!("<script>kept as-is</script>")
                );
            }
            ValidationResult::Invalid { errors } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_missing_optional_field_passes_through() {
        let data = record(json!({"ip_address": "203.0.113.45", "referrer": null}));
        match validate_and_sanitize(&data) {
            ValidationResult::Valid { sanitized } => {
                assert_eq!(sanitized["referrer"], Value::Null);
            }
            ValidationResult::Invalid { errors } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_type_violations() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "browser_name": 7,
            "screen_width": "wide"
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert!(errors.contains(&"Field 'browser_name' must be a string".to_string()));
        assert!(errors.contains(&"Field 'screen_width' must be a number".to_string()));
    }

    #[test]
    fn test_max_length_violation_names_exactly_that_field() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "webgl_renderer": "x".repeat(201),
            "browser_name": "Chrome"
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(
            errors,
            vec!["Field 'webgl_renderer' exceeds maximum length of 200"]
        );
    }

    #[test]
    fn test_numeric_range_violations() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "screen_width": -1,
            "screen_height": 10001
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert!(errors.contains(&"Field 'screen_width' must be at least 0".to_string()));
        assert!(errors.contains(&"Field 'screen_height' must be at most 10000".to_string()));
    }

    #[test]
    fn test_device_type_enum_violation() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "device_type": "Phone"
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(
            errors,
            vec!["Field 'device_type' must be one of [Mobile, Tablet, Desktop]"]
        );
    }

    #[test]
    fn test_device_type_accepts_only_declared_values() {
        for value in ["Mobile", "Tablet", "Desktop"] {
            let data = record(json!({"ip_address": "203.0.113.45", "device_type": value}));
            assert!(
                validate_and_sanitize(&data).is_valid(),
                "{} should be accepted",
                value
            );
        }
    }

    #[test]
    fn test_custom_validator_failure() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "referrer": "not a url"
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(errors, vec!["Field 'referrer' failed validation"]);
    }

    #[test]
    fn test_all_violations_collected_no_record_level_fail_fast() {
        // Private source address passes IP format validation, so the only
        // violations are the enum and range failures.
        let data = record(json!({
            "ip_address": "10.0.0.5",
            "device_type": "Phone",
            "screen_width": 99999
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(errors.len(), 2, "errors: {:?}", errors);
        assert!(errors
            .iter()
            .any(|e| e == "Field 'device_type' must be one of [Mobile, Tablet, Desktop]"));
        assert!(errors
            .iter()
            .any(|e| e == "Field 'screen_width' must be at most 10000"));
    }

    #[test]
    fn test_field_level_short_circuit() {
        // An over-long referrer fails the length check before the URL
        // validator runs: one error for the field, not two.
        let long_junk = format!("nonsense {}", "x".repeat(1000));
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "referrer": long_junk
        }));
        let errors = errors_of(validate_and_sanitize(&data));
        assert_eq!(
            errors,
            vec!["Field 'referrer' exceeds maximum length of 1000"]
        );
    }

    #[test]
    fn test_user_agent_custom_sanitizer_applied() {
        let data = record(json!({
            "ip_address": "203.0.113.45",
            "user_agent": "Mozilla/5.0 <script>probe()</script>"
        }));
        match validate_and_sanitize(&data) {
            ValidationResult::Valid { sanitized } => {
                assert_eq!(sanitized["user_agent"], json!("Mozilla/5.0"));
            }
            ValidationResult::Invalid { errors } => panic!("unexpected errors: {:?}", errors),
        }
    }
}
