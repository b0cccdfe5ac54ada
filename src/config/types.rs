//! Configuration of the [`ConfigManager`](crate::ConfigManager) itself

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use super::defaults::default_config;
use super::rules::{RuleSet, default_rules};
use crate::storage::{StorageBackend, YamlStorage};

/// Default application directory name under the system config dir
pub const DEFAULT_APP_DIR: &str = "nfd-parser";

/// Default config file stem; the storage extension is appended
pub const DEFAULT_FILE_STEM: &str = "app";

/// Source of environment variables
///
/// Abstracted so tests can inject variables without touching the process
/// environment.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Result<String, std::env::VarError>;
}

/// Reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// Settings for a [`ConfigManager`](crate::ConfigManager)
pub struct ManagerConfig<S: StorageBackend = YamlStorage> {
    /// Directory holding the config file
    pub config_dir: PathBuf,

    /// File name of the config file (e.g., "app.yml")
    pub config_file: String,

    /// Storage backend implementation
    pub storage: S,

    /// Rules used to validate loaded configuration
    pub rules: RuleSet,

    /// Base tree that loaded configuration is merged onto
    pub defaults: Value,

    /// Environment variable prefix for overrides (e.g., "NFD" -> NFD_SERVER_PORT)
    /// If None, env var overrides are disabled
    pub env_prefix: Option<String>,

    /// Where environment variables are read from
    pub env_source: Arc<dyn EnvSource>,

    /// Fail loading when validation reports errors
    pub strict: bool,
}

impl<S: StorageBackend> ManagerConfig<S> {
    /// Get the full path to the config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(&self.config_file)
    }
}

impl Default for ManagerConfig<YamlStorage> {
    fn default() -> Self {
        ManagerConfigBuilder::new().build()
    }
}

impl ManagerConfig<YamlStorage> {
    /// Create a new builder for `ManagerConfig`
    ///
    /// # Example
    /// ```rust
    /// use nfd_config::ManagerConfig;
    ///
    /// let config = ManagerConfig::builder()
    ///     .config_dir("/etc/nfd")
    ///     .with_env_prefix("NFD")
    ///     .build();
    ///
    /// assert_eq!(config.config_path(), std::path::PathBuf::from("/etc/nfd/app.yml"));
    /// ```
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::new()
    }
}

/// Builder for creating `ManagerConfig` with a fluent API
pub struct ManagerConfigBuilder<S: StorageBackend = YamlStorage> {
    config_dir: Option<PathBuf>,
    config_file: Option<String>,
    storage: S,
    rules: Option<RuleSet>,
    defaults: Option<Value>,
    env_prefix: Option<String>,
    env_source: Arc<dyn EnvSource>,
    strict: bool,
}

impl<S: StorageBackend + std::fmt::Debug> std::fmt::Debug for ManagerConfigBuilder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerConfigBuilder")
            .field("config_dir", &self.config_dir)
            .field("config_file", &self.config_file)
            .field("storage", &self.storage)
            .field("rules", &self.rules.as_ref().map(RuleSet::len))
            .field("env_prefix", &self.env_prefix)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

impl ManagerConfigBuilder<YamlStorage> {
    /// Create a builder with YAML storage and the built-in defaults and rules
    pub fn new() -> Self {
        Self {
            config_dir: None,
            config_file: None,
            storage: YamlStorage::new(),
            rules: None,
            defaults: None,
            env_prefix: None,
            env_source: Arc::new(DefaultEnvSource),
            strict: false,
        }
    }
}

impl Default for ManagerConfigBuilder<YamlStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StorageBackend> ManagerConfigBuilder<S> {
    /// Set the configuration directory
    ///
    /// Supports `~` expansion for home directory.
    #[must_use]
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = match (path.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => path,
        };
        self.config_dir = Some(expanded);
        self
    }

    /// Set the config file name (default: "app.<storage extension>")
    #[must_use]
    pub fn config_file(mut self, filename: impl Into<String>) -> Self {
        self.config_file = Some(filename.into());
        self
    }

    /// Use a different storage backend
    pub fn with_storage<T: StorageBackend>(self, storage: T) -> ManagerConfigBuilder<T> {
        ManagerConfigBuilder {
            config_dir: self.config_dir,
            config_file: self.config_file,
            storage,
            rules: self.rules,
            defaults: self.defaults,
            env_prefix: self.env_prefix,
            env_source: self.env_source,
            strict: self.strict,
        }
    }

    /// Validate with `rules` instead of the built-in rule set
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Merge loaded configuration onto `defaults` instead of the built-in template
    #[must_use]
    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Enable environment variable overrides
    ///
    /// The format is: `{PREFIX}_{SECTION}_{FIELD}` (all uppercase, dots become
    /// underscores), so with prefix "NFD", `NFD_SERVER_PORT=8080` overrides
    /// `server.port`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Read environment overrides from `source` instead of the process environment
    #[must_use]
    pub fn with_env_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.env_source = source;
        self
    }

    /// Fail loading when the configuration does not validate
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the `ManagerConfig`
    ///
    /// If `config_dir` is not set, uses the system config directory.
    pub fn build(self) -> ManagerConfig<S> {
        let config_dir = self.config_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_APP_DIR))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        let config_file = self
            .config_file
            .unwrap_or_else(|| format!("{DEFAULT_FILE_STEM}.{}", self.storage.extension()));

        ManagerConfig {
            config_dir,
            config_file,
            storage: self.storage,
            rules: self.rules.unwrap_or_else(|| default_rules().clone()),
            defaults: self.defaults.unwrap_or_else(default_config),
            env_prefix: self.env_prefix,
            env_source: self.env_source,
            strict: self.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;

    #[test]
    fn test_builder_defaults() {
        let config = ManagerConfig::builder().config_dir("/tmp/nfd").build();

        assert_eq!(config.config_file, "app.yml");
        assert_eq!(config.config_path(), PathBuf::from("/tmp/nfd/app.yml"));
        assert_eq!(&config.rules, default_rules());
        assert_eq!(config.defaults, default_config());
        assert!(config.env_prefix.is_none());
        assert!(!config.strict);
    }

    #[test]
    fn test_builder_with_json_storage() {
        let config = ManagerConfig::builder()
            .config_dir("/tmp/nfd")
            .with_storage(JsonStorage::new())
            .strict(true)
            .build();

        assert_eq!(config.config_file, "app.json");
        assert!(config.strict);
    }

    #[test]
    fn test_explicit_file_name_wins() {
        let config = ManagerConfig::builder()
            .config_file("app-dev.yml")
            .with_storage(JsonStorage::compact())
            .build();

        assert_eq!(config.config_file, "app-dev.yml");
    }

    #[test]
    fn test_tilde_expansion() {
        let config = ManagerConfig::builder().config_dir("~/nfd").build();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.config_dir, home.join("nfd"));
        }
    }
}
