//! Storage backend trait and implementations

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Trait for storage backend implementations
///
/// YAML is the native format of the parser service; JSON is kept for tools
/// that prefer it.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "yml", "json")
    fn extension(&self) -> &str;

    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content)
    }

    /// Serialize and write to file
    ///
    /// Uses atomic write: writes to temp file then renames to prevent corruption.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file_name = path.file_name().ok_or_else(|| {
            Error::Config(format!(
                "Invalid path '{}': must have a filename",
                path.display()
            ))
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// =============================================================================
// YAML Storage Implementation
// =============================================================================

/// YAML storage backend (default)
#[derive(Clone, Debug, Default)]
pub struct YamlStorage;

impl YamlStorage {
    /// Create a new YAML storage backend
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for YamlStorage {
    fn extension(&self) -> &str {
        "yml"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        serde_yaml::to_string(data).map_err(Error::from)
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        yaml_from_str(content).map_err(Error::from)
    }
}

/// Deserialize YAML text, rejecting duplicate mapping keys
///
/// The document goes through `serde_yaml::Value` first: its mapping refuses
/// repeated keys, where deserializing straight into the target type would
/// keep the last one.
pub(crate) fn yaml_from_str<T: DeserializeOwned>(
    text: &str,
) -> std::result::Result<T, serde_yaml::Error> {
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    serde_yaml::from_value(document)
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend
#[derive(Clone, Debug, Default)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
