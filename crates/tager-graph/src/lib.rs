//! Tager tag graph engine
//!
//! Files are organized by attaching them to named tags, and tags may contain
//! other tags. The result is a directed graph rather than a tree:
//!
//! ```text
//!   music ──► jazz ──► bebop
//!     │                  ▲
//!     └────► live ───────┘      (a tag may be reached along several paths)
//! ```
//!
//! ## Components
//!
//! - [`TagStore`]: the graph itself (tags, edges, current tag)
//! - [`GraphNavigator`]: resolves tag references, including `.`
//! - [`CycleGuard`]: rejects tag→tag edges that would close a cycle
//! - [`ClosureComputer`]: shallow/recursive child tags and files
//! - [`SetQueryEngine`]: AND-queries over file closures
//! - [`ConsistencyReconciler`]: finds and removes dangling edges
//!
//! The store is built once per process and passed by reference into each
//! component; nothing here keeps global state or touches the snapshot file.

pub mod closure;
pub mod cycle;
pub mod error;
pub mod navigator;
pub mod node;
pub mod query;
pub mod reconcile;
pub mod store;

pub use closure::{ChildTags, ClosureComputer, ClosureEntry, Files, Walk};
pub use cycle::CycleGuard;
pub use error::{Result, TagError};
pub use navigator::{GraphNavigator, CURRENT_ALIAS};
pub use node::TagNode;
pub use query::SetQueryEngine;
pub use reconcile::{
    ConsistencyReconciler, Dangling, EdgeKind, FsProbe, PathProbe, ReconcileReport,
};
pub use store::{TagStore, PATH_SEPARATOR};
