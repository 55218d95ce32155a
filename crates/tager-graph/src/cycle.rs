//! Edge validation for tag→tag insertions.

use crate::closure::Walk;
use crate::error::{Result, TagError};
use crate::navigator::GraphNavigator;
use crate::node::TagNode;
use crate::store::{TagStore, PATH_SEPARATOR};

/// Rejects any tag→tag edge that would close a cycle.
///
/// [`TagStore::link`] is the only way to insert such an edge and always asks
/// the guard first.
#[derive(Debug, Clone, Copy)]
pub struct CycleGuard<'a> {
    store: &'a TagStore,
}

impl<'a> CycleGuard<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Check the edge `src -> dst`: it closes a cycle exactly when `src` is
    /// `dst` or is reachable from `dst`.
    pub fn check_edge(&self, src: &TagNode, dst: &'a TagNode) -> Result<()> {
        if src.name == dst.name {
            return Err(TagError::Cycle {
                path: format!("{0} -> {0}", src.name),
            });
        }

        let mut walk = Walk::new(self.store, dst);
        while let Some((node, path)) = walk.next_visit() {
            if node.name == src.name {
                let back = path.split(PATH_SEPARATOR).collect::<Vec<_>>().join(" -> ");
                return Err(TagError::Cycle {
                    path: format!("{} -> {back}", src.name),
                });
            }
        }
        Ok(())
    }

    /// [`check_edge`](Self::check_edge) on tag references.
    pub fn check_refs(&self, src: &str, dst: &str) -> Result<()> {
        let navigator = GraphNavigator::new(self.store);
        self.check_edge(navigator.resolve(src)?, navigator.resolve(dst)?)
    }
}
