//! Tager snapshot storage
//!
//! The whole tag graph lives in one JSON document (by default
//! `~/.tager/config.json`). It is read once when a command starts and, after a
//! mutating command, written back in full:
//!
//! ```text
//!   load ──► TagStore ──► command ──► save (whole file)
//! ```
//!
//! There is no locking: two processes writing the same snapshot race and the
//! last writer wins.

pub mod config;
pub mod error;
pub mod snapshot;


pub use config::{StorageConfig, CONFIG_ENV};
pub use error::StorageError;
pub use snapshot::SnapshotDocument;

use std::fs;
use std::path::Path;
use tager_graph::TagStore;

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

/// Reads and writes the snapshot described by a [`StorageConfig`].
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    config: StorageConfig,
}

impl SnapshotFile {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.snapshot_path
    }

    /// Load the snapshot, creating an empty one (and its directory) first if
    /// it does not exist yet.
    pub fn load_or_init(&self) -> Result<TagStore> {
        let path = self.path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no snapshot yet, creating an empty one");
            let store = TagStore::new();
            self.save(&store)?;
            return Ok(store);
        }
        self.load()
    }

    pub fn load(&self) -> Result<TagStore> {
        let path = self.path();
        let bytes = fs::read(path).map_err(|e| StorageError::io("reading", path, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!(path = %path.display(), "snapshot is empty, starting from no tags");
            return Ok(TagStore::new());
        }

        let doc = SnapshotDocument::from_json(&bytes).map_err(|source| StorageError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        let store = TagStore::from(doc);
        tracing::debug!(path = %path.display(), tags = store.len(), "loaded snapshot");
        Ok(store)
    }

    /// Serialize and write the whole store.
    pub fn save(&self, store: &TagStore) -> Result<()> {
        let path = self.path();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StorageError::io("creating", dir, e))?;
        }

        let bytes = SnapshotDocument::from(store)
            .to_json()
            .map_err(|source| StorageError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, bytes).map_err(|e| StorageError::io("writing", path, e))?;
        tracing::debug!(path = %path.display(), tags = store.len(), "saved snapshot");
        Ok(())
    }
}
