//! Rule-based validation of configuration trees
//!
//! The validator never fails and never mutates its input: every problem it
//! finds becomes one entry in the returned list, in rule-set order
//! (section, then field, then required → type → range → pattern).

use crate::config::{FieldRule, RuleSet, ValueType, default_rules, value_kind};
use log::warn;
use serde_json::Value;
use thiserror::Error;

/// One violation found while checking a configuration tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required section: {section}")]
    MissingSection { section: String },

    #[error("Missing required field: {section}.{field}")]
    MissingField { section: String, field: String },

    /// `actual` names the node kind from [`value_kind`]. Sequences report
    /// `array` and mappings `object`; older tooling said `object` for both.
    #[error("Invalid type for {section}.{field}: expected {expected}, got {actual}")]
    TypeMismatch {
        section: String,
        field: String,
        expected: ValueType,
        actual: &'static str,
    },

    #[error("Value too small for {section}.{field}: {value} < {min}")]
    TooSmall {
        section: String,
        field: String,
        value: f64,
        min: f64,
    },

    #[error("Value too large for {section}.{field}: {value} > {max}")]
    TooLarge {
        section: String,
        field: String,
        value: f64,
        max: f64,
    },

    #[error("Value does not match pattern for {section}.{field}: {pattern}")]
    PatternMismatch {
        section: String,
        field: String,
        pattern: String,
    },
}

impl ValidationError {
    /// Dotted path of the offending node (`section` or `section.field`)
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            ValidationError::MissingSection { section } => section.clone(),
            ValidationError::MissingField { section, field }
            | ValidationError::TypeMismatch { section, field, .. }
            | ValidationError::TooSmall { section, field, .. }
            | ValidationError::TooLarge { section, field, .. }
            | ValidationError::PatternMismatch { section, field, .. } => {
                format!("{section}.{field}")
            }
        }
    }
}

/// Check `config` against `rules`, returning structured violations
#[must_use]
pub fn check_config(config: &Value, rules: &RuleSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for section in rules.sections() {
        let name = section.name();
        let Some(section_value) = present(config.get(name)) else {
            errors.push(ValidationError::MissingSection {
                section: name.to_string(),
            });
            continue;
        };

        for (field, rule) in section.fields() {
            check_field(
                name,
                field,
                rule,
                present(section_value.get(field)),
                &mut errors,
            );
        }
    }

    errors
}

/// Check `config` against `rules`, returning one message per violation.
///
/// An empty list means the configuration is valid.
///
/// # Example
///
/// ```
/// use nfd_config::{default_config, default_rules, validate_config};
///
/// let mut config = default_config();
/// config["server"]["port"] = serde_json::json!("6400");
///
/// let errors = validate_config(&config, default_rules());
/// assert_eq!(
///     errors,
///     vec!["Invalid type for server.port: expected number, got string"]
/// );
/// ```
#[must_use]
pub fn validate_config(config: &Value, rules: &RuleSet) -> Vec<String> {
    check_config(config, rules)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// [`validate_config`] with the built-in rule set
#[must_use]
pub fn validate_default(config: &Value) -> Vec<String> {
    validate_config(config, default_rules())
}

/// `null` counts as absent
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn check_field(
    section: &str,
    field: &str,
    rule: &FieldRule,
    value: Option<&Value>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(value) = value else {
        if rule.required {
            errors.push(ValidationError::MissingField {
                section: section.to_string(),
                field: field.to_string(),
            });
        }
        return;
    };

    if !rule.value_type.matches(value) {
        errors.push(ValidationError::TypeMismatch {
            section: section.to_string(),
            field: field.to_string(),
            expected: rule.value_type,
            actual: value_kind(value),
        });
    }

    match (rule.value_type, value) {
        (ValueType::Number, Value::Number(number)) => {
            let Some(number) = number.as_f64() else {
                return;
            };
            if let Some(min) = rule.min {
                if number < min {
                    errors.push(ValidationError::TooSmall {
                        section: section.to_string(),
                        field: field.to_string(),
                        value: number,
                        min,
                    });
                }
            }
            if let Some(max) = rule.max {
                if number > max {
                    errors.push(ValidationError::TooLarge {
                        section: section.to_string(),
                        field: field.to_string(),
                        value: number,
                        max,
                    });
                }
            }
        }
        (ValueType::String, Value::String(text)) => {
            let Some(ref pattern) = rule.pattern else {
                return;
            };
            match regex::Regex::new(pattern) {
                Ok(re) if !re.is_match(text) => errors.push(ValidationError::PatternMismatch {
                    section: section.to_string(),
                    field: field.to_string(),
                    pattern: pattern.clone(),
                }),
                Ok(_) => {}
                Err(e) => warn!("Skipping pattern check for {section}.{field}: {e}"),
            }
        }
        _ => {}
    }
}
