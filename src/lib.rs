//! # nfd-config - NFD Parser configuration helper
//!
//! Schema, validation, YAML round-trip and deep merge for the configuration
//! of the NFD Parser network-disk link resolution service.
//!
//! ## Features
//!
//! - **Default Templates**: The service's `app.yml` and proxy templates as immutable statics
//! - **Rule-Based Validation**: Required fields, type tags, numeric ranges and regex patterns
//! - **YAML Round-Trip**: Parse with validation, generate with stable key order
//! - **Deep Merge**: Overlay user configuration onto defaults without touching either input
//! - **File Management**: Load/save with environment overrides and owner-only permissions
//! - **Docs Generation**: Markdown reference tables straight from the rule set
//!
//! ## Quick Start
//!
//! ```rust
//! use nfd_config::{default_config, generate_yaml_config, merge_config, parse_yaml_config};
//! use serde_json::json;
//!
//! let user = json!({ "server": { "port": 8080 }, "custom": { "ignoresReg": [] } });
//! let merged = merge_config(&default_config(), &user);
//!
//! let yaml = generate_yaml_config(&merged)?;
//! let outcome = parse_yaml_config(&yaml);
//!
//! assert!(outcome.success);
//! assert_eq!(outcome.config, Some(merged));
//! # Ok::<(), nfd_config::Error>(())
//! ```
//!
//! ## Validation
//!
//! Problems are reported as data, one message per violation, in rule order:
//!
//! ```rust
//! use nfd_config::{default_rules, validate_config};
//! use serde_json::json;
//!
//! let config = json!({
//!     "server": {
//!         "port": 6400,
//!         "contextPath": "/",
//!         "enableDatabase": true,
//!         "domainName": "http://127.0.0.1:6401"
//!     },
//!     "rateLimit": { "enable": true, "limit": 0, "timeWindow": 10, "pathReg": "^/v2/.*" }
//! });
//!
//! assert_eq!(
//!     validate_config(&config, default_rules()),
//!     vec![
//!         "Value too small for rateLimit.limit: 0 < 1",
//!         "Missing required section: dataSource",
//!     ]
//! );
//! ```
//!
//! ## Managing A Config File
//!
//! ```rust,no_run
//! use nfd_config::ConfigManager;
//!
//! # fn example() -> nfd_config::Result<()> {
//! let manager = ConfigManager::builder()
//!     .config_dir("~/.config/nfd-parser")
//!     .with_env_prefix("NFD") // NFD_SERVER_PORT=8080 overrides server.port
//!     .build()?;
//!
//! let loaded = manager.load()?;
//! if !loaded.is_valid() {
//!     for error in &loaded.errors {
//!         eprintln!("{error}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod docs;
mod error;
mod manager;
mod merge;
mod serializer;
mod validate;

pub mod config;
pub mod security;
pub mod storage;

// Re-exports from core
pub use docs::{DocsConfig, generate_docs};
pub use error::{Error, Result};
pub use manager::{ConfigManager, ConfigManagerBuilder, EnvironmentHandler, LoadedConfig};
pub use merge::{merge_config, merge_layers};
pub use serializer::{
    ParseOutcome, generate_yaml_config, parse_yaml_config, parse_yaml_config_with_rules,
};
pub use storage::{JsonStorage, StorageBackend, YamlStorage};
pub use validate::{ValidationError, check_config, validate_config, validate_default};

// Re-exports from config
pub use config::{
    DEFAULT_CONFIG, DEFAULT_PROXY_CONFIG, DEFAULT_RULES, DefaultEnvSource, EnvSource, FieldRule,
    ManagerConfig, ManagerConfigBuilder, RuleSet, SectionRules, ValueType, default_config,
    default_proxy_config, default_rules,
};
