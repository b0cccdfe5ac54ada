//! Configuration schema: default templates, validation rules and the
//! settings of the manager
//!
//! - `DEFAULT_CONFIG` / `DEFAULT_PROXY_CONFIG` - templates the service ships with
//! - `RuleSet` - declarative rules checked by the validator
//! - `ManagerConfig` - where and how a `ConfigManager` loads its file

mod defaults;
mod rules;
mod types;

pub use defaults::{DEFAULT_CONFIG, DEFAULT_PROXY_CONFIG, default_config, default_proxy_config};
pub use rules::{
    DEFAULT_RULES, FieldRule, RuleSet, SectionRules, ValueType, default_rules, value_kind,
};
pub use types::{
    DEFAULT_APP_DIR, DEFAULT_FILE_STEM, DefaultEnvSource, EnvSource, ManagerConfig,
    ManagerConfigBuilder,
};
