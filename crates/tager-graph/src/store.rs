//! The in-memory tag graph and its mutations.
//!
//! `TagStore` is constructed once per process (usually from a snapshot) and
//! handed by reference to every other component. All tag references accepted
//! here go through [`GraphNavigator`], so `.` means the current tag
//! everywhere, and every tag→tag edge goes through [`CycleGuard`].

use crate::cycle::CycleGuard;
use crate::error::{Result, TagError};
use crate::navigator::{GraphNavigator, CURRENT_ALIAS};
use crate::node::TagNode;
use std::collections::BTreeMap;

/// Separator used in closure paths; forbidden inside tag names.
pub const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
    tags: BTreeMap<String, TagNode>,
    current: Option<String>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted nodes.
    ///
    /// Edges are taken as-is: a snapshot is trusted state, not a mutation, so
    /// the cycle guard is not consulted here. Traversals carry their own
    /// visited-sets and stay finite even if the snapshot holds a cycle.
    pub fn restore(nodes: impl IntoIterator<Item = TagNode>, current: Option<String>) -> Self {
        let tags = nodes
            .into_iter()
            .map(|node| (node.name.clone(), node))
            .collect();
        Self { tags, current }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get(&self, name: &str) -> Option<&TagNode> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TagNode> {
        self.tags.values()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Total number of tag→tag edges, dangling ones included.
    pub fn edge_count(&self) -> usize {
        self.tags.values().map(|n| n.child_tags.len()).sum()
    }

    pub(crate) fn node_mut(&mut self, name: &str) -> Option<&mut TagNode> {
        self.tags.get_mut(name)
    }

    fn resolve_name(&self, reference: &str) -> Result<String> {
        GraphNavigator::new(self)
            .resolve(reference)
            .map(|node| node.name.clone())
    }

    fn resolved_mut(&mut self, reference: &str) -> Result<&mut TagNode> {
        let name = self.resolve_name(reference)?;
        self.tags
            .get_mut(&name)
            .ok_or(TagError::TagNotFound(name))
    }

    // ========================================================================
    // Tags
    // ========================================================================

    pub fn validate_name(name: &str) -> Result<()> {
        let reason = if name.is_empty() {
            "tag names cannot be empty"
        } else if name == CURRENT_ALIAS {
            "`.` is reserved for the current tag"
        } else if name.contains(PATH_SEPARATOR) {
            "tag names cannot contain `/`"
        } else {
            return Ok(());
        };
        Err(TagError::InvalidName {
            name: name.to_string(),
            reason,
        })
    }

    /// Create an empty tag. An existing tag is left untouched.
    pub fn create(&mut self, name: &str) -> Result<()> {
        Self::validate_name(name)?;
        if self.tags.contains_key(name) {
            return Err(TagError::DuplicateTag(name.to_string()));
        }
        tracing::debug!(tag = name, "creating tag");
        self.tags.insert(name.to_string(), TagNode::new(name));
        Ok(())
    }

    /// Remove a tag. Edges pointing at it from other tags are kept and become
    /// dangling; the current pointer is not touched.
    pub fn delete(&mut self, reference: &str) -> Result<TagNode> {
        let name = self.resolve_name(reference)?;
        tracing::debug!(tag = %name, "deleting tag");
        self.tags.remove(&name).ok_or(TagError::TagNotFound(name))
    }

    /// Point `.` at an existing tag and return its name.
    pub fn set_current(&mut self, reference: &str) -> Result<String> {
        let name = self.resolve_name(reference)?;
        self.current = Some(name.clone());
        Ok(name)
    }

    pub fn set_comment(&mut self, reference: &str, comment: impl Into<String>) -> Result<()> {
        let node = self.resolved_mut(reference)?;
        node.comment = Some(comment.into());
        Ok(())
    }

    // ========================================================================
    // Tag edges
    // ========================================================================

    /// Add the edge `parent -> child` once the cycle guard accepts it.
    pub fn link(&mut self, parent: &str, child: &str) -> Result<()> {
        let navigator = GraphNavigator::new(self);
        let src = navigator.resolve(parent)?;
        let dst = navigator.resolve(child)?;
        if src.has_child(&dst.name) {
            return Err(TagError::DuplicateEdge {
                tag: src.name.clone(),
                child: dst.name.clone(),
            });
        }
        CycleGuard::new(self).check_edge(src, dst)?;

        let (src, dst) = (src.name.clone(), dst.name.clone());
        tracing::debug!(parent = %src, child = %dst, "linking tags");
        if let Some(node) = self.tags.get_mut(&src) {
            node.child_tags.insert(dst);
        }
        Ok(())
    }

    /// Drop the edge `parent -> child`. `child` does not need to exist, so
    /// dangling edges can be removed by name.
    pub fn unlink(&mut self, parent: &str, child: &str) -> Result<()> {
        let child = if child == CURRENT_ALIAS {
            self.resolve_name(child)?
        } else {
            child.to_string()
        };
        let node = self.resolved_mut(parent)?;
        if !node.child_tags.remove(&child) {
            return Err(TagError::TagNotFound(child));
        }
        tracing::debug!(parent = %node.name, child = %child, "unlinked tags");
        Ok(())
    }

    // ========================================================================
    // File edges
    // ========================================================================

    /// Register `path` (absolute) on a tag, remembering how the user wrote it.
    pub fn add_file(&mut self, reference: &str, path: &str, display: &str) -> Result<()> {
        let node = self.resolved_mut(reference)?;
        if node.has_file(path) {
            return Err(TagError::DuplicateFile {
                tag: node.name.clone(),
                path: path.to_string(),
            });
        }
        tracing::debug!(tag = %node.name, path, "adding file");
        node.files.insert(path.to_string(), display.to_string());
        Ok(())
    }

    pub fn remove_file(&mut self, reference: &str, path: &str) -> Result<()> {
        let node = self.resolved_mut(reference)?;
        if node.files.remove(path).is_none() {
            return Err(TagError::FileNotFound(path.to_string()));
        }
        tracing::debug!(tag = %node.name, path, "removed file");
        Ok(())
    }
}
