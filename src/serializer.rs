//! YAML parsing and generation for configuration trees
//!
//! Two failure channels are kept apart:
//!
//! - text that is not YAML at all (including mappings with a repeated key)
//!   yields a single `"YAML parsing error: ..."` entry and no tree,
//! - text that parses but breaks the rules yields the validator's messages
//!   *and* the parsed tree, so callers can inspect or repair it.

use crate::config::{RuleSet, default_rules};
use crate::error::Result;
use crate::storage::yaml_from_str;
use crate::validate::validate_config;
use log::debug;
use serde::Serialize;
use serde_json::Value;

/// Result of [`parse_yaml_config`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    /// `true` when the text parsed and produced no validation errors
    pub success: bool,
    /// Parsed tree; `None` only on syntax errors
    pub config: Option<Value>,
    /// Syntax error or validation messages
    pub errors: Vec<String>,
}

impl ParseOutcome {
    /// Turn the outcome into a `Result`, keeping the tree only when valid
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] carrying the messages when the
    /// parse was not successful.
    pub fn into_result(self) -> Result<Value> {
        match self.config {
            Some(config) if self.success => Ok(config),
            _ => Err(crate::Error::InvalidConfig {
                errors: self.errors,
            }),
        }
    }
}

/// Parse YAML text and validate it with the built-in rule set
///
/// # Example
///
/// ```
/// use nfd_config::parse_yaml_config;
///
/// let outcome = parse_yaml_config("server: [6400");
/// assert!(!outcome.success);
/// assert!(outcome.config.is_none());
/// assert!(outcome.errors[0].starts_with("YAML parsing error: "));
/// ```
#[must_use]
pub fn parse_yaml_config(text: &str) -> ParseOutcome {
    parse_yaml_config_with_rules(text, default_rules())
}

/// Parse YAML text and validate it with `rules`
#[must_use]
pub fn parse_yaml_config_with_rules(text: &str, rules: &RuleSet) -> ParseOutcome {
    let config: Value = match yaml_from_str(text) {
        Ok(config) => config,
        Err(e) => {
            debug!("YAML parsing failed: {e}");
            return ParseOutcome {
                success: false,
                config: None,
                errors: vec![format!("YAML parsing error: {e}")],
            };
        }
    };

    let errors = validate_config(&config, rules);
    debug!("Parsed configuration with {} validation error(s)", errors.len());

    ParseOutcome {
        success: errors.is_empty(),
        config: Some(config),
        errors,
    }
}

/// Render a configuration tree as YAML
///
/// Output uses 2-space block indentation, keeps the tree's key order,
/// never wraps long scalars and never emits anchors or aliases.
///
/// # Errors
///
/// Returns [`crate::Error::Yaml`] if the emitter fails.
pub fn generate_yaml_config(config: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}
