//! One command invocation's view of the graph.

use anyhow::{Context, Result};
use tager_graph::TagStore;
use tager_storage::{SnapshotFile, StorageConfig};

/// The loaded graph plus the file it came from.
pub struct Session {
    file: SnapshotFile,
    pub store: TagStore,
}

impl Session {
    pub fn open(config: StorageConfig) -> Result<Self> {
        let file = SnapshotFile::new(config);
        let store = file
            .load_or_init()
            .with_context(|| format!("loading {}", file.path().display()))?;
        Ok(Self { file, store })
    }

    /// Write the whole graph back.
    pub fn save(&self) -> Result<()> {
        self.file
            .save(&self.store)
            .with_context(|| format!("saving {}", self.file.path().display()))
    }
}
