use std::collections::{BTreeMap, BTreeSet};

/// A named node of the tag graph.
///
/// `child_tags` holds names only: an edge survives the deletion of the tag it
/// points to and becomes dangling until reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNode {
    pub name: String,
    pub comment: Option<String>,
    pub child_tags: BTreeSet<String>,
    /// Absolute path -> path as originally supplied by the user.
    pub files: BTreeMap<String, String>,
}

impl TagNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child_tags.contains(name)
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
