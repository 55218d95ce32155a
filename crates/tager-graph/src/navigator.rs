//! Tag reference resolution.

use crate::error::{Result, TagError};
use crate::node::TagNode;
use crate::store::TagStore;

/// Tag reference that stands for the current tag.
pub const CURRENT_ALIAS: &str = ".";

/// Resolves user-supplied tag references against a [`TagStore`].
///
/// This is the only place where `.` is substituted by the current tag.
#[derive(Debug, Clone, Copy)]
pub struct GraphNavigator<'a> {
    store: &'a TagStore,
}

impl<'a> GraphNavigator<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    pub fn resolve(&self, reference: &str) -> Result<&'a TagNode> {
        let name = if reference == CURRENT_ALIAS {
            self.store.current().ok_or(TagError::NoCurrentTag)?
        } else {
            reference
        };
        self.store
            .get(name)
            .ok_or_else(|| TagError::TagNotFound(name.to_string()))
    }

    pub fn exists(&self, reference: &str) -> bool {
        self.resolve(reference).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name() {
        let mut store = TagStore::new();
        store.create("docs").unwrap();
        let nav = GraphNavigator::new(&store);
        assert_eq!(nav.resolve("docs").unwrap().name, "docs");
        assert_eq!(
            nav.resolve("nope").unwrap_err(),
            TagError::TagNotFound("nope".into())
        );
    }

    #[test]
    fn test_dot_without_current() {
        let store = TagStore::new();
        let nav = GraphNavigator::new(&store);
        assert_eq!(nav.resolve(".").unwrap_err(), TagError::NoCurrentTag);
        assert!(!nav.exists("."));
    }

    #[test]
    fn test_dot_with_deleted_current() {
        let mut store = TagStore::new();
        store.create("docs").unwrap();
        store.set_current("docs").unwrap();
        assert_eq!(GraphNavigator::new(&store).resolve(".").unwrap().name, "docs");

        store.delete("docs").unwrap();
        assert_eq!(store.current(), Some("docs"));
        assert_eq!(
            GraphNavigator::new(&store).resolve(".").unwrap_err(),
            TagError::TagNotFound("docs".into())
        );
    }
}
