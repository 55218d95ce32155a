//! Closure computation over child-tag edges.
//!
//! Everything that follows `child_tags` (show, mount, AND-queries, the cycle
//! guard) is built on [`Walk`], a lazy depth-first traversal with an explicit
//! visited-set. Each call starts a fresh walk; none of them can be restarted.

use crate::error::Result;
use crate::navigator::GraphNavigator;
use crate::node::TagNode;
use crate::store::{TagStore, PATH_SEPARATOR};
use std::collections::{btree_map, btree_set, HashSet};

/// Depth-first traversal of every tag reachable from an origin.
///
/// The origin itself is not yielded. Each tag is yielded at most once, even
/// when the stored graph contains a cycle. Child names without a node are
/// skipped: a deleted tag has no edges to follow.
pub struct Walk<'a> {
    store: &'a TagStore,
    stack: Vec<(&'a str, String)>,
    visited: HashSet<&'a str>,
}

impl<'a> Walk<'a> {
    pub fn new(store: &'a TagStore, origin: &'a TagNode) -> Self {
        let mut walk = Self {
            store,
            stack: Vec::new(),
            visited: HashSet::new(),
        };
        walk.visited.insert(origin.name.as_str());
        walk.push_children(origin, &origin.name);
        walk
    }

    fn push_children(&mut self, node: &'a TagNode, path: &str) {
        // Reversed so the lexicographically first child is popped first.
        for child in node.child_tags.iter().rev() {
            self.stack
                .push((child.as_str(), format!("{path}{PATH_SEPARATOR}{child}")));
        }
    }

    /// Advance the walk, returning the next reached node with the
    /// slash-joined path from the origin (`origin/child/grandchild`).
    pub fn next_visit(&mut self) -> Option<(&'a TagNode, String)> {
        while let Some((name, path)) = self.stack.pop() {
            if !self.visited.insert(name) {
                continue;
            }
            let Some(node) = self.store.get(name) else {
                continue;
            };
            self.push_children(node, &path);
            return Some((node, path));
        }
        None
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = ClosureEntry;

    fn next(&mut self) -> Option<ClosureEntry> {
        let (node, path) = self.next_visit()?;
        Some(ClosureEntry {
            name: node.name.clone(),
            path,
        })
    }
}

/// A child tag listed by [`ClosureComputer::child_tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureEntry {
    pub name: String,
    /// Slash-joined path starting at the origin tag.
    pub path: String,
}

impl ClosureEntry {
    /// The path with the origin segment stripped (`child/grandchild`).
    pub fn relative_path(&self) -> &str {
        self.path
            .split_once(PATH_SEPARATOR)
            .map_or(self.path.as_str(), |(_, rest)| rest)
    }
}

/// Child tags of one origin, shallow or recursive.
pub enum ChildTags<'a> {
    Direct {
        origin: &'a str,
        names: btree_set::Iter<'a, String>,
    },
    Recursive(Walk<'a>),
}

impl Iterator for ChildTags<'_> {
    type Item = ClosureEntry;

    fn next(&mut self) -> Option<ClosureEntry> {
        match self {
            ChildTags::Direct { origin, names } => names.next().map(|name| ClosureEntry {
                name: name.clone(),
                path: format!("{origin}{PATH_SEPARATOR}{name}"),
            }),
            ChildTags::Recursive(walk) => walk.next(),
        }
    }
}

/// Absolute paths of the files attached to an origin and, when recursive, to
/// every tag of its closure. The same path can appear more than once.
pub struct Files<'a> {
    current: btree_map::Keys<'a, String, String>,
    walk: Option<Walk<'a>>,
}

impl<'a> Iterator for Files<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(path) = self.current.next() {
                return Some(path.as_str());
            }
            let (node, _) = self.walk.as_mut()?.next_visit()?;
            self.current = node.files.keys();
        }
    }
}

/// Enumerates what is reachable from a tag.
#[derive(Debug, Clone, Copy)]
pub struct ClosureComputer<'a> {
    store: &'a TagStore,
}

impl<'a> ClosureComputer<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Start a fresh recursive walk from `reference`.
    pub fn walk(&self, reference: &str) -> Result<Walk<'a>> {
        let origin = GraphNavigator::new(self.store).resolve(reference)?;
        Ok(Walk::new(self.store, origin))
    }

    pub fn child_tags(&self, reference: &str, recursive: bool) -> Result<ChildTags<'a>> {
        let origin = GraphNavigator::new(self.store).resolve(reference)?;
        Ok(if recursive {
            ChildTags::Recursive(Walk::new(self.store, origin))
        } else {
            ChildTags::Direct {
                origin: &origin.name,
                names: origin.child_tags.iter(),
            }
        })
    }

    pub fn files(&self, reference: &str, recursive: bool) -> Result<Files<'a>> {
        let origin = GraphNavigator::new(self.store).resolve(reference)?;
        Ok(Files {
            current: origin.files.keys(),
            walk: recursive.then(|| Walk::new(self.store, origin)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagError;

    fn diamond() -> TagStore {
        let mut store = TagStore::new();
        for name in ["a", "b", "c", "d"] {
            store.create(name).unwrap();
        }
        store.link("a", "b").unwrap();
        store.link("a", "c").unwrap();
        store.link("b", "d").unwrap();
        store.link("c", "d").unwrap();
        store
    }

    #[test]
    fn test_diamond_visits_each_tag_once() {
        let store = diamond();
        let closure = ClosureComputer::new(&store);
        let names: Vec<String> = closure
            .child_tags("a", true)
            .unwrap()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["b", "d", "c"]);
    }

    #[test]
    fn test_recursive_paths_start_at_origin() {
        let store = diamond();
        let entries: Vec<ClosureEntry> = ClosureComputer::new(&store)
            .child_tags("a", true)
            .unwrap()
            .collect();
        assert_eq!(entries[1].path, "a/b/d");
        assert_eq!(entries[1].relative_path(), "b/d");
    }

    #[test]
    fn test_shallow_lists_direct_children_including_dangling() {
        let mut store = diamond();
        store.delete("c").unwrap();
        let names: Vec<String> = ClosureComputer::new(&store)
            .child_tags("a", false)
            .unwrap()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["b", "c"]);

        let deep: Vec<String> = ClosureComputer::new(&store)
            .child_tags("a", true)
            .unwrap()
            .map(|e| e.name)
            .collect();
        assert_eq!(deep, vec!["b", "d"]);
    }

    #[test]
    fn test_walk_terminates_on_restored_cycle() {
        let mut x = TagNode::new("x");
        x.child_tags.insert("y".into());
        let mut y = TagNode::new("y");
        y.child_tags.insert("x".into());
        let store = TagStore::restore(vec![x, y], None);

        let names: Vec<String> = ClosureComputer::new(&store)
            .child_tags("x", true)
            .unwrap()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["y"]);
    }

    #[test]
    fn test_files_shallow_and_recursive() {
        let mut store = diamond();
        store.add_file("a", "/f/a", "a").unwrap();
        store.add_file("b", "/f/shared", "s").unwrap();
        store.add_file("d", "/f/d", "d").unwrap();
        store.add_file("c", "/f/shared", "s").unwrap();

        let closure = ClosureComputer::new(&store);
        let shallow: Vec<&str> = closure.files("a", false).unwrap().collect();
        assert_eq!(shallow, vec!["/f/a"]);

        let deep: Vec<&str> = closure.files("a", true).unwrap().collect();
        assert_eq!(deep, vec!["/f/a", "/f/shared", "/f/d", "/f/shared"]);
    }

    #[test]
    fn test_each_call_starts_fresh() {
        let store = diamond();
        let closure = ClosureComputer::new(&store);
        let first = closure.child_tags("a", true).unwrap().count();
        let second = closure.child_tags("a", true).unwrap().count();
        assert_eq!(first, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_origin() {
        let store = diamond();
        let closure = ClosureComputer::new(&store);
        assert!(matches!(
            closure.files("zzz", true),
            Err(TagError::TagNotFound(_))
        ));
        assert!(matches!(
            closure.child_tags("zzz", false),
            Err(TagError::TagNotFound(_))
        ));
    }
}
