//! Environment variable overrides for configuration trees

use crate::config::{EnvSource, RuleSet, ValueType};
use log::debug;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Handles environment variable lookups and parsing
pub struct EnvironmentHandler {
    prefix: Option<String>,
    source: Arc<dyn EnvSource>,
}

impl EnvironmentHandler {
    pub fn new(prefix: Option<String>, source: Arc<dyn EnvSource>) -> Self {
        Self { prefix, source }
    }

    /// Get the environment variable name for a dotted config path
    ///
    /// Returns None if env var overrides are disabled.
    /// Format: {PREFIX}_{SECTION}_{FIELD} (all uppercase, `.` and `-` become `_`)
    pub fn env_var_name(&self, path: &str) -> Option<String> {
        self.prefix.as_ref().map(|prefix| {
            let env_key = path.replace(['.', '-'], "_").to_uppercase();
            format!("{}_{}", prefix.to_uppercase(), env_key)
        })
    }

    /// Value of the override for `path`, if one is set
    ///
    /// Fields declared as strings in `rules` take the raw text; everything
    /// else is parsed as JSON first, then guessed as bool, number or string.
    pub fn env_override(&self, path: &str, rules: &RuleSet) -> Option<Value> {
        let env_var_name = self.env_var_name(path)?;
        let raw = self.source.var(&env_var_name).ok()?;

        Some(match declared_type(rules, path) {
            Some(ValueType::String) => Value::String(raw),
            _ => parse_env_value(raw),
        })
    }

    /// Apply every override that matches a leaf of `tree` or a field of `rules`.
    ///
    /// Returns the dotted paths that were overridden, in tree order followed by
    /// rule order.
    pub fn apply(&self, tree: &mut Value, rules: &RuleSet) -> Vec<String> {
        if self.prefix.is_none() {
            return Vec::new();
        }

        let mut paths = Vec::new();
        collect_leaf_paths(tree, "", &mut paths);
        for section in rules.sections() {
            for (field, _) in section.fields() {
                let path = format!("{}.{field}", section.name());
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }

        let mut applied = Vec::new();
        for path in paths {
            if let Some(value) = self.env_override(&path, rules) {
                debug!("Environment override for {path}");
                set_path(tree, &path, value);
                applied.push(path);
            }
        }
        applied
    }
}

fn declared_type(rules: &RuleSet, path: &str) -> Option<ValueType> {
    let (section, field) = path.split_once('.')?;
    rules.get(section)?.get(field).map(|rule| rule.value_type)
}

/// Try JSON first, then bool/number heuristics, then plain string
fn parse_env_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or_else(|_| {
        if raw.eq_ignore_ascii_case("true") {
            Value::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Value::Bool(false)
        } else if let Ok(n) = raw.parse::<i64>() {
            Value::Number(n.into())
        } else if let Ok(n) = raw.parse::<f64>() {
            serde_json::Number::from_f64(n).map_or_else(|| Value::String(raw.clone()), Value::Number)
        } else {
            Value::String(raw)
        }
    })
}

fn collect_leaf_paths(value: &Value, prefix: &str, out: &mut Vec<String>) {
    let Value::Object(map) = value else {
        if !prefix.is_empty() {
            out.push(prefix.to_string());
        }
        return;
    };
    for (key, child) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        collect_leaf_paths(child, &path, out);
    }
}

fn set_path(tree: &mut Value, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut node = tree;

    while let Some(segment) = segments.next() {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
