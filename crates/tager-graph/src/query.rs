//! AND-queries over file closures.

use crate::closure::ClosureComputer;
use crate::error::{Result, TagError};
use crate::store::TagStore;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct SetQueryEngine<'a> {
    store: &'a TagStore,
}

impl<'a> SetQueryEngine<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Files reachable from every tag in `references`.
    ///
    /// The result keeps the relative order of the first tag's file list and
    /// contains no duplicates. Every reference must resolve.
    pub fn intersect_files<S: AsRef<str>>(
        &self,
        references: &[S],
        recursive: bool,
    ) -> Result<Vec<&'a str>> {
        let closure = ClosureComputer::new(self.store);
        let lists = references
            .iter()
            .map(|r| closure.files(r.as_ref(), recursive).map(Iterator::collect))
            .collect::<Result<Vec<Vec<&str>>>>()?;

        let mut lists = lists.into_iter();
        let mut acc = lists.next().ok_or(TagError::EmptyQuery)?;
        for list in lists {
            let other: HashSet<&str> = list.into_iter().collect();
            acc.retain(|path| other.contains(path));
        }

        let mut seen = HashSet::new();
        acc.retain(|path| seen.insert(*path));
        Ok(acc)
    }
}
