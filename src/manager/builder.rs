//! Builder for ConfigManager
//!
//! This module contains [`ConfigManagerBuilder`] which provides a fluent API
//! for creating a [`ConfigManager`](super::ConfigManager).

use crate::config::{EnvSource, ManagerConfigBuilder, RuleSet};
use crate::error::Result;
use crate::storage::{StorageBackend, YamlStorage};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use super::ConfigManager;

/// Builder for creating a [`ConfigManager`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use nfd_config::{ConfigManager, FieldRule, JsonStorage, RuleSet, SectionRules, default_rules};
///
/// let mut rules = default_rules().clone();
/// rules.extend(RuleSet::new().section(
///     SectionRules::new("vertx").field("workerPoolSize", FieldRule::number().min(0.0)),
/// ));
///
/// let manager = ConfigManager::builder()
///     .config_dir("/etc/nfd")
///     .config_file("app-dev.json")
///     .with_storage(JsonStorage::new())
///     .with_rules(rules)
///     .strict(true)
///     .build()?;
/// # Ok::<(), nfd_config::Error>(())
/// ```
pub struct ConfigManagerBuilder<S: StorageBackend = YamlStorage> {
    config_builder: ManagerConfigBuilder<S>,
}

impl ConfigManagerBuilder<YamlStorage> {
    /// Create a new builder with YAML storage and built-in defaults and rules.
    pub fn new() -> Self {
        Self {
            config_builder: ManagerConfigBuilder::new(),
        }
    }
}

impl Default for ConfigManagerBuilder<YamlStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StorageBackend> ConfigManagerBuilder<S> {
    /// Set the configuration directory.
    ///
    /// Supports `~` expansion for home directory.
    #[must_use]
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.config_dir(path);
        self
    }

    /// Set the config file name (default: "app.<storage extension>").
    #[must_use]
    pub fn config_file(mut self, filename: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.config_file(filename);
        self
    }

    /// Use a different storage backend.
    pub fn with_storage<T: StorageBackend>(self, storage: T) -> ConfigManagerBuilder<T> {
        ConfigManagerBuilder {
            config_builder: self.config_builder.with_storage(storage),
        }
    }

    /// Validate with `rules` instead of the built-in rule set.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.config_builder = self.config_builder.with_rules(rules);
        self
    }

    /// Merge loaded configuration onto `defaults`.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.config_builder = self.config_builder.with_defaults(defaults);
        self
    }

    /// Enable environment variable overrides.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let manager = ConfigManager::builder()
    ///     .with_env_prefix("NFD")
    ///     .build()?;
    ///
    /// // Now NFD_SERVER_PORT=8080 will override "server.port"
    /// ```
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.with_env_prefix(prefix);
        self
    }

    /// Read overrides from `source` instead of the process environment.
    #[must_use]
    pub fn with_env_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.config_builder = self.config_builder.with_env_source(source);
        self
    }

    /// Fail loading and saving when validation reports errors.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.config_builder = self.config_builder.strict(strict);
        self
    }

    /// Build the [`ConfigManager`].
    ///
    /// # Errors
    ///
    /// Returns an error if the rule set is invalid.
    pub fn build(self) -> Result<ConfigManager<S>> {
        ConfigManager::new(self.config_builder.build())
    }
}
