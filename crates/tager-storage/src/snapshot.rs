//! The persisted document.
//!
//! ```text
//! { "root": { "current": "music",
//!             "tags": { "music": { "comment": "...",
//!                                  "tags":  { "jazz": "jazz" },
//!                                  "files": { "/abs/a.mp3": "a.mp3" } } } } }
//! ```
//!
//! Child-tag values mirror their keys; only the keys are read back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tager_graph::{TagNode, TagStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub root: RootDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, TagDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, String>,
}

impl From<&TagStore> for SnapshotDocument {
    fn from(store: &TagStore) -> Self {
        let tags = store
            .nodes()
            .map(|node| {
                let doc = TagDocument {
                    comment: node.comment.clone(),
                    tags: node
                        .child_tags
                        .iter()
                        .map(|c| (c.clone(), c.clone()))
                        .collect(),
                    files: node.files.clone(),
                };
                (node.name.clone(), doc)
            })
            .collect();
        SnapshotDocument {
            root: RootDocument {
                current: store.current().map(str::to_string),
                tags,
            },
        }
    }
}

impl From<SnapshotDocument> for TagStore {
    fn from(doc: SnapshotDocument) -> Self {
        let nodes = doc.root.tags.into_iter().map(|(name, tag)| TagNode {
            name,
            comment: tag.comment,
            child_tags: tag.tags.into_keys().collect(),
            files: tag.files,
        });
        TagStore::restore(nodes, doc.root.current)
    }
}

impl SnapshotDocument {
    /// Tab-indented JSON, one key per line.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        out.push(b'\n');
        Ok(out)
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
