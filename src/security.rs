//! File permission helpers for saved configuration files
//!
//! Configuration files carry the database password (`dataSource.password`),
//! so written files are restricted to their owner. On non-Unix platforms
//! these helpers only create what is missing.

use crate::error::{Error, Result};
use std::path::Path;

/// Owner read/write for config files
#[cfg(unix)]
const CONFIG_FILE_MODE: u32 = 0o600;

/// Owner read/write/execute for config directories
#[cfg(unix)]
const CONFIG_DIR_MODE: u32 = 0o700;

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)
        .map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .permissions();
    perms.set_mode(mode);

    std::fs::set_permissions(path, perms).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Restrict a written configuration file to its owner (Unix: 0o600)
///
/// # Errors
///
/// Returns [`Error::FileRead`] / [`Error::FileWrite`] if the permissions
/// cannot be read or changed.
pub fn restrict_config_file(path: &Path) -> Result<()> {
    #[cfg(unix)]
    set_mode(path, CONFIG_FILE_MODE)?;
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Create a configuration directory (and parents) owned-only (Unix: 0o700)
///
/// An already existing directory keeps its permissions.
///
/// # Errors
///
/// Returns [`Error::DirectoryCreate`] if the directory cannot be created.
pub fn ensure_config_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    set_mode(path, CONFIG_DIR_MODE)?;

    Ok(())
}
