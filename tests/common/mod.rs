//! Common test utilities for nfd-config integration tests
//!
//! Provides shared fixtures, sample YAML documents and an in-memory
//! environment source.

#![allow(dead_code)]

use nfd_config::{ConfigManager, EnvSource, YamlStorage, default_config};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

// =============================================================================
// Sample Documents
// =============================================================================

/// A complete, valid `app.yml` as users write it
pub const VALID_APP_YML: &str = r#"server:
  port: 6400
  contextPath: /
  enableDatabase: true
  domainName: http://127.0.0.1:6401
  previewURL: https://nfd-parser.github.io/nfd-preview/preview.html?src=
vertx:
  eventLoopPoolSize: 0
  workerPoolSize: 0
rateLimit:
  enable: true
  limit: 10
  timeWindow: 10
  pathReg: ^/v2/.*
dataSource:
  jdbcUrl: jdbc:h2:file:./db/nfdData;MODE=MySQL;DATABASE_TO_UPPER=FALSE
  username: root
  password: '123456'
"#;

/// Default configuration without one top-level section
pub fn default_without(section: &str) -> Value {
    let mut config = default_config();
    config
        .as_object_mut()
        .expect("default config is a mapping")
        .shift_remove(section);
    config
}

// =============================================================================
// Environment
// =============================================================================

/// Environment source backed by a map
#[derive(Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn with(vars: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Result<String, std::env::VarError> {
        self.0.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Temporary directory with a YAML `ConfigManager` pointed at it
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub manager: ConfigManager<YamlStorage>,
}

impl TestFixture {
    /// Fixture with default configuration and no environment overrides
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::builder()
            .config_dir(temp_dir.path())
            .build()
            .expect("Failed to create manager");

        Self { temp_dir, manager }
    }

    /// Fixture reading overrides with prefix `NFD` from `vars`
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::builder()
            .config_dir(temp_dir.path())
            .with_env_prefix("NFD")
            .with_env_source(MapEnv::with(vars))
            .build()
            .expect("Failed to create manager");

        Self { temp_dir, manager }
    }

    /// Fixture that refuses invalid configuration
    pub fn strict() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::builder()
            .config_dir(temp_dir.path())
            .strict(true)
            .build()
            .expect("Failed to create manager");

        Self { temp_dir, manager }
    }

    /// Path of the managed `app.yml`
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("app.yml")
    }

    /// Write raw text to the managed file
    pub fn write_config(&self, text: &str) {
        std::fs::write(self.config_path(), text).expect("Failed to write config");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
