//! Config file manager
//!
//! [`ConfigManager`] wires the pure pieces of the crate to a file on disk:
//!
//! 1. read the file (missing file = empty override),
//! 2. merge it onto the defaults,
//! 3. apply environment overrides,
//! 4. validate the result.

mod builder;
mod env;

pub use builder::ConfigManagerBuilder;
pub use env::EnvironmentHandler;

use crate::config::{ManagerConfig, RuleSet};
use crate::error::{Error, Result};
use crate::merge::merge_config;
use crate::security::{ensure_config_dir, restrict_config_file};
use crate::storage::{StorageBackend, YamlStorage};
use crate::validate::validate_config;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Configuration produced by [`ConfigManager::load`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// Effective tree: defaults + file + environment
    pub config: Value,
    /// Validation messages for `config` (empty when valid)
    pub errors: Vec<String>,
    /// Dotted paths that came from environment variables
    pub env_overrides: Vec<String>,
    /// File the user configuration was read from, if it existed
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Whether the effective configuration passed validation
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Loads, validates and saves the parser service's configuration file.
///
/// # Example
///
/// ```rust,no_run
/// use nfd_config::ConfigManager;
///
/// let manager = ConfigManager::builder()
///     .config_dir("~/.config/nfd-parser")
///     .with_env_prefix("NFD")
///     .build()?;
///
/// let loaded = manager.load()?;
/// for error in &loaded.errors {
///     eprintln!("{error}");
/// }
/// # Ok::<(), nfd_config::Error>(())
/// ```
pub struct ConfigManager<S: StorageBackend = YamlStorage> {
    config: ManagerConfig<S>,
    env_handler: EnvironmentHandler,
}

impl ConfigManager<YamlStorage> {
    /// Create a builder with YAML storage
    pub fn builder() -> ConfigManagerBuilder {
        ConfigManagerBuilder::new()
    }
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Create a manager from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] if the configured rule set is broken.
    pub fn new(config: ManagerConfig<S>) -> Result<Self> {
        config.rules.validate_schema()?;

        let env_handler =
            EnvironmentHandler::new(config.env_prefix.clone(), config.env_source.clone());

        debug!(
            "Config manager for {} ({} rule section(s))",
            config.config_path().display(),
            config.rules.len()
        );

        Ok(Self {
            config,
            env_handler,
        })
    }

    /// Full path of the managed config file
    pub fn config_path(&self) -> PathBuf {
        self.config.config_path()
    }

    /// Base tree loaded configuration is merged onto
    pub fn defaults(&self) -> &Value {
        &self.config.defaults
    }

    /// Rules used for validation
    pub fn rules(&self) -> &RuleSet {
        &self.config.rules
    }

    /// Load the config file and resolve the effective configuration.
    ///
    /// A missing file is not an error: the defaults (plus environment
    /// overrides) are used.
    ///
    /// # Errors
    ///
    /// - [`Error::FileRead`] / [`Error::Yaml`] / [`Error::Json`] if the file
    ///   exists but cannot be read or parsed
    /// - [`Error::InvalidConfig`] in strict mode when validation fails
    pub fn load(&self) -> Result<LoadedConfig> {
        let path = self.config_path();
        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return self.resolve(&Value::Object(Map::new()), None);
        }

        let user: Value = self.config.storage.read(&path)?;
        debug!("Loaded user configuration from {}", path.display());
        self.resolve(&user, Some(path))
    }

    /// Resolve the effective configuration from text in the storage format
    ///
    /// # Errors
    ///
    /// Same as [`ConfigManager::load`], minus file errors.
    pub fn load_from_str(&self, text: &str) -> Result<LoadedConfig> {
        let user: Value = self.config.storage.deserialize(text)?;
        self.resolve(&user, None)
    }

    fn resolve(&self, user: &Value, source: Option<PathBuf>) -> Result<LoadedConfig> {
        let mut config = merge_config(&self.config.defaults, user);
        let env_overrides = self.env_handler.apply(&mut config, &self.config.rules);
        let errors = validate_config(&config, &self.config.rules);

        if !errors.is_empty() {
            warn!("Configuration has {} validation error(s)", errors.len());
            if self.config.strict {
                return Err(Error::InvalidConfig { errors });
            }
        }

        Ok(LoadedConfig {
            config,
            errors,
            env_overrides,
            source,
        })
    }

    /// Write `config` to the managed file with owner-only permissions.
    ///
    /// Returns the validation messages for what was written; in strict mode
    /// an invalid tree is refused instead.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] in strict mode when `config` does not validate
    /// - I/O and serialization errors from the storage backend
    pub fn save(&self, config: &Value) -> Result<Vec<String>> {
        let errors = validate_config(config, &self.config.rules);
        if !errors.is_empty() && self.config.strict {
            return Err(Error::InvalidConfig { errors });
        }

        let path = self.config_path();
        self.write_file(&path, config)?;
        info!("Saved configuration to {}", path.display());
        Ok(errors)
    }

    /// Overwrite the managed file with the defaults
    ///
    /// # Errors
    ///
    /// I/O and serialization errors from the storage backend.
    pub fn reset(&self) -> Result<()> {
        let path = self.config_path();
        self.write_file(&path, &self.config.defaults)?;
        info!("Reset configuration at {} to defaults", path.display());
        Ok(())
    }

    fn write_file(&self, path: &Path, config: &Value) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_config_dir(parent)?;
        }
        self.config.storage.write(path, config)?;
        restrict_config_file(path)
    }
}
