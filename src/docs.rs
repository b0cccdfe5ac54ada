//! Documentation generator for configuration rules
//!
//! Generates a Markdown reference from a [`RuleSet`] and its default tree,
//! ready to drop into the documentation site.

use crate::config::{FieldRule, RuleSet};
use serde_json::Value;
use std::fmt::Write;

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// List default sections that no rule covers
    pub show_unvalidated: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_unvalidated: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn hide_unvalidated(mut self) -> Self {
        self.show_unvalidated = false;
        self
    }
}

/// Generate a Markdown reference for `rules`, showing defaults from `defaults`
#[must_use]
pub fn generate_docs(rules: &RuleSet, defaults: &Value, config: DocsConfig) -> String {
    let mut output = String::new();

    let title = config
        .title
        .unwrap_or_else(|| "Configuration Reference".to_string());
    let _ = writeln!(output, "# {title}\n");

    if let Some(desc) = config.description {
        let _ = writeln!(output, "{desc}\n");
    }

    for section in rules.sections() {
        let _ = writeln!(output, "## `{}`\n", section.name());
        output.push_str("| Field | Type | Required | Default | Constraints |\n");
        output.push_str("|-------|------|----------|---------|-------------|\n");

        for (field, rule) in section.fields() {
            let default = defaults
                .get(section.name())
                .and_then(|s| s.get(field))
                .map_or_else(|| "-".to_string(), format_default);
            let _ = writeln!(
                output,
                "| `{field}` | {} | {} | {} | {} |",
                rule.value_type,
                if rule.required { "yes" } else { "no" },
                default,
                format_constraints(rule),
            );
        }
        output.push('\n');
    }

    if config.show_unvalidated {
        let unvalidated: Vec<&String> = defaults
            .as_object()
            .map(|sections| {
                sections
                    .keys()
                    .filter(|name| rules.get(name).is_none())
                    .collect()
            })
            .unwrap_or_default();

        if !unvalidated.is_empty() {
            output.push_str("## Other Sections\n\n");
            output.push_str("These sections are part of the default configuration but are not validated:\n\n");
            for name in unvalidated {
                let _ = writeln!(output, "- `{name}`");
            }
            output.push('\n');
        }
    }

    output
}

fn format_default(value: &Value) -> String {
    let rendered = serde_json::to_string(value).unwrap_or_default();
    format!("`{}`", escape_cell(&rendered))
}

fn format_constraints(rule: &FieldRule) -> String {
    let mut parts = Vec::new();
    if let Some(min) = rule.min {
        parts.push(format!("min: {min}"));
    }
    if let Some(max) = rule.max {
        parts.push(format!("max: {max}"));
    }
    if let Some(ref pattern) = rule.pattern {
        parts.push(format!("pattern: `{}`", escape_cell(pattern)));
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

/// Pipes would end the table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
