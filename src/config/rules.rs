//! Declarative validation rules
//!
//! # Overview
//!
//! A [`RuleSet`] describes the expected shape of a configuration tree:
//!
//! - an ordered list of sections ([`SectionRules`]),
//! - each holding an ordered list of fields with a [`FieldRule`].
//!
//! Order matters: the validator reports problems in rule-set order, so
//! sections and fields keep the order they were declared in.
//!
//! ```rust
//! use nfd_config::{FieldRule, RuleSet, SectionRules};
//!
//! let rules = RuleSet::new().section(
//!     SectionRules::new("server")
//!         .field("port", FieldRule::number().required().min(1.0).max(65535.0))
//!         .field("contextPath", FieldRule::string().required()),
//! );
//!
//! assert!(rules.validate_schema().is_ok());
//! ```
//!
//! # Loading Rules From Text
//!
//! Rule sets can also be written in YAML (or any format that produces a
//! `serde_json::Value`), using the same keys the builder uses:
//!
//! ```rust
//! use nfd_config::RuleSet;
//!
//! let rules = RuleSet::from_yaml_str(
//!     "vertx:\n  workerPoolSize: { type: number, required: true, min: 0 }\n",
//! )?;
//! assert!(rules.get("vertx").is_some());
//! # Ok::<(), nfd_config::Error>(())
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

// =============================================================================
// Value Types
// =============================================================================

/// Declared type of a leaf field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Integer or floating point number
    Number,
    /// UTF-8 string
    String,
    /// `true` / `false`
    Boolean,
}

impl ValueType {
    /// Name used in messages and in rule files
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
        }
    }

    /// Whether `value` carries this type tag
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ValueType::Number, Value::Number(_))
                | (ValueType::String, Value::String(_))
                | (ValueType::Boolean, Value::Bool(_))
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type name of an arbitrary tree node, as reported in type mismatches
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Field Rule
// =============================================================================

/// Constraint descriptor for a single field
///
/// # Example
///
/// ```
/// use nfd_config::{FieldRule, ValueType};
///
/// let limit = FieldRule::number().required().min(1.0);
/// assert_eq!(limit.value_type, ValueType::Number);
/// assert!(limit.required);
/// assert_eq!(limit.min, Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Expected type of the value
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Whether absence (or `null`) is an error
    #[serde(default)]
    pub required: bool,

    /// Inclusive lower bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Regex a string value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldRule {
    fn of(value_type: ValueType) -> Self {
        Self {
            value_type,
            required: false,
            min: None,
            max: None,
            pattern: None,
        }
    }

    /// Optional number field
    pub fn number() -> Self {
        Self::of(ValueType::Number)
    }

    /// Optional string field
    pub fn string() -> Self {
        Self::of(ValueType::String)
    }

    /// Optional boolean field
    pub fn boolean() -> Self {
        Self::of(ValueType::Boolean)
    }

    /// Mark the field as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the inclusive minimum
    #[must_use]
    pub fn min(mut self, val: f64) -> Self {
        self.min = Some(val);
        self
    }

    /// Set the inclusive maximum
    #[must_use]
    pub fn max(mut self, val: f64) -> Self {
        self.max = Some(val);
        self
    }

    /// Set a regex the string value must match
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Check the rule definition itself
    ///
    /// - min/max only on number rules, with min <= max
    /// - pattern only on string rules, non-empty and compilable
    pub fn validate_schema(&self) -> std::result::Result<(), String> {
        if self.value_type != ValueType::Number && (self.min.is_some() || self.max.is_some()) {
            return Err(format!(
                "min/max are only allowed on number fields, not {}",
                self.value_type
            ));
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(format!("min ({min}) cannot be greater than max ({max})"));
            }
        }

        if let Some(ref pattern) = self.pattern {
            if self.value_type != ValueType::String {
                return Err(format!(
                    "pattern is only allowed on string fields, not {}",
                    self.value_type
                ));
            }
            if pattern.is_empty() {
                return Err("Pattern cannot be empty string".to_string());
            }
            regex::Regex::new(pattern).map_err(|e| format!("Invalid regex pattern: {e}"))?;
        }

        Ok(())
    }
}

// =============================================================================
// Section Rules
// =============================================================================

/// Rules for the fields of one section, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRules {
    name: String,
    fields: Vec<(String, FieldRule)>,
}

impl SectionRules {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field rule, replacing an existing rule of the same name in place
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name.into(), rule);
        self
    }

    fn insert(&mut self, name: String, rule: FieldRule) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = rule,
            None => self.fields.push((name, rule)),
        }
    }

    /// Section name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Look up a single field rule
    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the section declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// Ordered mapping of section name to [`SectionRules`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    sections: Vec<SectionRules>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section, replacing an existing section of the same name in place
    #[must_use]
    pub fn section(mut self, section: SectionRules) -> Self {
        self.insert(section);
        self
    }

    fn insert(&mut self, section: SectionRules) {
        match self.sections.iter_mut().find(|s| s.name == section.name) {
            Some(slot) => *slot = section,
            None => self.sections.push(section),
        }
    }

    /// Merge another rule set into this one.
    ///
    /// Sections of `other` replace same-named sections here; new sections are
    /// appended in `other`'s order.
    pub fn extend(&mut self, other: RuleSet) {
        for section in other.sections {
            self.insert(section);
        }
    }

    /// Sections in declaration order
    pub fn sections(&self) -> impl Iterator<Item = &SectionRules> {
        self.sections.iter()
    }

    /// Look up a section by name
    pub fn get(&self, name: &str) -> Option<&SectionRules> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section is declared
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Validate every field rule of the set
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] for the first broken rule, keyed as
    /// `section.field`.
    pub fn validate_schema(&self) -> Result<()> {
        for section in &self.sections {
            for (field, rule) in section.fields() {
                rule.validate_schema().map_err(|reason| Error::InvalidRule {
                    key: format!("{}.{field}", section.name),
                    reason,
                })?;
            }
        }
        Ok(())
    }

    /// Build a rule set from `{section: {field: {type, required, min, max, pattern}}}`
    ///
    /// Key order of the input is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] if the shape is wrong or a rule fails
    /// [`RuleSet::validate_schema`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let sections = value.as_object().ok_or_else(|| Error::InvalidRule {
            key: "<root>".to_string(),
            reason: "rule set must be a mapping of sections".to_string(),
        })?;

        let mut rules = RuleSet::new();
        for (section_name, fields) in sections {
            rules.insert(section_from_value(section_name, fields)?);
        }

        rules.validate_schema()?;
        Ok(rules)
    }

    /// Parse a rule set written in YAML
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] on syntax errors and [`Error::InvalidRule`] on
    /// malformed rules.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = crate::storage::yaml_from_str(text)?;
        Self::from_value(&value)
    }

    /// Render the rule set back into its `Value` form
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut sections = Map::new();
        for section in &self.sections {
            let mut fields = Map::new();
            for (name, rule) in section.fields() {
                // FieldRule only holds plain data, so this cannot fail
                let rule = serde_json::to_value(rule).unwrap_or(Value::Null);
                fields.insert(name.to_string(), rule);
            }
            sections.insert(section.name.clone(), Value::Object(fields));
        }
        Value::Object(sections)
    }
}

fn section_from_value(name: &str, fields: &Value) -> Result<SectionRules> {
    let fields = fields.as_object().ok_or_else(|| Error::InvalidRule {
        key: name.to_string(),
        reason: "section rules must be a mapping of fields".to_string(),
    })?;

    let mut section = SectionRules::new(name);
    for (field, rule) in fields {
        let rule: FieldRule =
            serde_json::from_value(rule.clone()).map_err(|e| Error::InvalidRule {
                key: format!("{name}.{field}"),
                reason: e.to_string(),
            })?;
        section.insert(field.clone(), rule);
    }
    Ok(section)
}

// =============================================================================
// Built-in Rules
// =============================================================================

/// Rules applied when no rule set is given.
///
/// Only `server`, `rateLimit` and `dataSource` are covered. The other sections
/// of the default template are left unchecked; extend the set to cover them.
pub static DEFAULT_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .section(
            SectionRules::new("server")
                .field(
                    "port",
                    FieldRule::number().required().min(1.0).max(65535.0),
                )
                .field("contextPath", FieldRule::string().required())
                .field("enableDatabase", FieldRule::boolean().required())
                .field("domainName", FieldRule::string().required())
                .field("previewURL", FieldRule::string()),
        )
        .section(
            SectionRules::new("rateLimit")
                .field("enable", FieldRule::boolean().required())
                .field("limit", FieldRule::number().required().min(1.0))
                .field("timeWindow", FieldRule::number().required().min(1.0))
                .field("pathReg", FieldRule::string().required()),
        )
        .section(
            SectionRules::new("dataSource")
                .field("jdbcUrl", FieldRule::string().required())
                .field("username", FieldRule::string().required())
                .field("password", FieldRule::string().required()),
        )
});

/// The built-in rule set
#[must_use]
pub fn default_rules() -> &'static RuleSet {
    &DEFAULT_RULES
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_rules_order() {
        let names: Vec<&str> = default_rules().sections().map(SectionRules::name).collect();
        assert_eq!(names, vec!["server", "rateLimit", "dataSource"]);

        let server: Vec<&str> = default_rules()
            .get("server")
            .unwrap()
            .fields()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            server,
            vec!["port", "contextPath", "enableDatabase", "domainName", "previewURL"]
        );
    }

    #[test]
    fn test_default_rules_are_valid() {
        assert!(default_rules().validate_schema().is_ok());
    }

    #[test]
    fn test_preview_url_is_optional() {
        let rule = default_rules()
            .get("server")
            .unwrap()
            .get("previewURL")
            .unwrap();
        assert!(!rule.required);
    }

    #[test]
    fn test_value_type_matches() {
        assert!(ValueType::Number.matches(&json!(1)));
        assert!(ValueType::Number.matches(&json!(1.5)));
        assert!(!ValueType::Number.matches(&json!("1")));
        assert!(ValueType::String.matches(&json!("x")));
        assert!(ValueType::Boolean.matches(&json!(false)));
        assert!(!ValueType::Boolean.matches(&json!(null)));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!(["a"])), "array");
        assert_eq!(value_kind(&json!({})), "object");
        assert_eq!(value_kind(&json!(3)), "number");
    }

    #[test]
    fn test_schema_validation() {
        assert!(FieldRule::number().min(0.0).max(10.0).validate_schema().is_ok());
        assert!(FieldRule::number().min(10.0).max(0.0).validate_schema().is_err());
        assert!(FieldRule::string().min(1.0).validate_schema().is_err());
        assert!(FieldRule::boolean().pattern("^x$").validate_schema().is_err());
        assert!(FieldRule::string().pattern("(").validate_schema().is_err());
        assert!(FieldRule::string().pattern("").validate_schema().is_err());
    }

    #[test]
    fn test_field_replaces_in_place() {
        let section = SectionRules::new("s")
            .field("a", FieldRule::string())
            .field("b", FieldRule::string())
            .field("a", FieldRule::number());

        let fields: Vec<_> = section.fields().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "a");
        assert_eq!(fields[0].1.value_type, ValueType::Number);
    }

    #[test]
    fn test_extend_replaces_and_appends() {
        let mut rules = default_rules().clone();
        rules.extend(
            RuleSet::new()
                .section(SectionRules::new("server").field("port", FieldRule::number()))
                .section(
                    SectionRules::new("vertx")
                        .field("workerPoolSize", FieldRule::number().min(0.0)),
                ),
        );

        let names: Vec<&str> = rules.sections().map(SectionRules::name).collect();
        assert_eq!(names, vec!["server", "rateLimit", "dataSource", "vertx"]);
        assert_eq!(rules.get("server").unwrap().len(), 1);
    }

    #[test]
    fn test_from_value_keeps_order() {
        let rules = RuleSet::from_value(&json!({
            "zeta": { "b": { "type": "string" }, "a": { "type": "number", "min": 1 } },
            "alpha": { "flag": { "type": "boolean", "required": true } }
        }))
        .unwrap();

        let names: Vec<&str> = rules.sections().map(SectionRules::name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let zeta: Vec<&str> = rules.get("zeta").unwrap().fields().map(|(n, _)| n).collect();
        assert_eq!(zeta, vec!["b", "a"]);
        assert!(rules.get("alpha").unwrap().get("flag").unwrap().required);
    }

    #[test]
    fn test_from_value_rejects_bad_rules() {
        let err = RuleSet::from_value(&json!({ "s": { "f": { "type": "date" } } })).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { ref key, .. } if key == "s.f"));

        let err = RuleSet::from_value(&json!({
            "s": { "f": { "type": "number", "min": 5, "max": 1 } }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRule { .. }));

        assert!(RuleSet::from_value(&json!(["not", "a", "map"])).is_err());
        assert!(RuleSet::from_value(&json!({ "s": 1 })).is_err());
    }

    #[test]
    fn test_to_value_round_trip() {
        let value = default_rules().to_value();
        assert_eq!(value["server"]["port"]["max"], json!(65535.0));
        assert_eq!(value["server"]["previewURL"]["required"], json!(false));

        let rebuilt = RuleSet::from_value(&value).unwrap();
        assert_eq!(&rebuilt, default_rules());
    }
}
