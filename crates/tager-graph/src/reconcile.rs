//! Dangling-edge detection and removal ("autoremove").
//!
//! Both scans look at direct edges only: a dangling edge two levels below a
//! target is found by scanning its own tag, not an ancestor.

use crate::error::TagError;
use crate::navigator::GraphNavigator;
use crate::node::TagNode;
use crate::store::TagStore;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Filesystem existence check used by the file scan.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by `std::fs::metadata`. Symlinks are followed, so a
/// link whose target is gone counts as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Tag,
    File,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Tag => f.write_str("tag"),
            EdgeKind::File => f.write_str("file"),
        }
    }
}

/// Dangling edges of one kind found on one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dangling {
    pub tag: String,
    pub kind: EdgeKind,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Only tags that actually have dangling edges are listed.
    pub dangling: Vec<Dangling>,
    /// Target references that could not be resolved; the scan skipped them.
    pub unresolved: Vec<TagError>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }

    /// Number of dangling edges across all tags.
    pub fn edge_count(&self) -> usize {
        self.dangling.iter().map(|d| d.targets.len()).sum()
    }

    fn merge(&mut self, other: ReconcileReport) {
        self.dangling.extend(other.dangling);
        self.unresolved.extend(other.unresolved);
    }
}

pub struct ConsistencyReconciler<'p, P: PathProbe> {
    probe: &'p P,
}

impl<'p, P: PathProbe> ConsistencyReconciler<'p, P> {
    pub fn new(probe: &'p P) -> Self {
        Self { probe }
    }

    /// Report dangling edges of `kind` on `targets` (every tag when empty)
    /// without touching the store. A tag named twice is scanned once.
    pub fn scan<S: AsRef<str>>(
        &self,
        store: &TagStore,
        kind: EdgeKind,
        targets: &[S],
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let navigator = GraphNavigator::new(store);

        let nodes: Vec<&TagNode> = if targets.is_empty() {
            store.nodes().collect()
        } else {
            let mut seen = HashSet::new();
            targets
                .iter()
                .filter_map(|t| match navigator.resolve(t.as_ref()) {
                    Ok(node) => Some(node),
                    Err(err) => {
                        report.unresolved.push(err);
                        None
                    }
                })
                .filter(|node| seen.insert(node.name.as_str()))
                .collect()
        };

        for node in nodes {
            let dangling = self.dangling_on(store, node, kind);
            if !dangling.is_empty() {
                report.dangling.push(Dangling {
                    tag: node.name.clone(),
                    kind,
                    targets: dangling,
                });
            }
        }
        report
    }

    /// Both scans, tags first.
    pub fn scan_all<S: AsRef<str>>(&self, store: &TagStore, targets: &[S]) -> ReconcileReport {
        let mut report = self.scan(store, EdgeKind::Tag, targets);
        let files = self.scan(store, EdgeKind::File, targets);
        report.dangling.extend(files.dangling);
        report
    }

    /// Remove every dangling edge [`scan`](Self::scan) finds and return what
    /// was removed. The caller is responsible for persisting the store.
    pub fn execute<S: AsRef<str>>(
        &self,
        store: &mut TagStore,
        kind: EdgeKind,
        targets: &[S],
    ) -> ReconcileReport {
        let report = self.scan(store, kind, targets);
        for found in &report.dangling {
            let Some(node) = store.node_mut(&found.tag) else {
                continue;
            };
            for target in &found.targets {
                match kind {
                    EdgeKind::Tag => node.child_tags.remove(target),
                    EdgeKind::File => node.files.remove(target).is_some(),
                };
            }
            tracing::info!(
                tag = %found.tag,
                kind = %kind,
                removed = found.targets.len(),
                "removed dangling edges"
            );
        }
        report
    }

    /// [`execute`](Self::execute) for tags, then files.
    pub fn execute_all<S: AsRef<str>>(
        &self,
        store: &mut TagStore,
        targets: &[S],
    ) -> ReconcileReport {
        let mut report = self.execute(store, EdgeKind::Tag, targets);
        let mut files = self.execute(store, EdgeKind::File, targets);
        // Unresolved targets are the same for both passes.
        files.unresolved.clear();
        report.merge(files);
        report
    }

    fn dangling_on(&self, store: &TagStore, node: &TagNode, kind: EdgeKind) -> Vec<String> {
        let navigator = GraphNavigator::new(store);
        match kind {
            EdgeKind::Tag => node
                .child_tags
                .iter()
                .filter(|child| !navigator.exists(child))
                .cloned()
                .collect(),
            EdgeKind::File => node
                .files
                .keys()
                .filter(|path| !self.probe.exists(Path::new(path.as_str())))
                .cloned()
                .collect(),
        }
    }
}
