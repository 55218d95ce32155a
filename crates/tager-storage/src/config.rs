//! Where the snapshot lives.

use crate::error::StorageError;
use std::path::PathBuf;

/// Environment variable overriding the snapshot location.
pub const CONFIG_ENV: &str = "TAGER_CONFIG";

/// Directory (under `$HOME`) and file name of the default snapshot.
pub const DEFAULT_DIR: &str = ".tager";
pub const DEFAULT_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Path to the JSON snapshot
    pub snapshot_path: PathBuf,
}

impl StorageConfig {
    pub fn with_path(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Resolve the snapshot location: an explicit path wins, then
    /// `TAGER_CONFIG`, then `~/.tager/config.json`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, StorageError> {
        if let Some(path) = explicit {
            return Ok(Self::with_path(path));
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::with_path(path));
        }
        let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
        Ok(Self::with_path(home.join(DEFAULT_DIR).join(DEFAULT_FILE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = StorageConfig::resolve(Some(PathBuf::from("/tmp/x.json"))).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/x.json"));
    }
}
