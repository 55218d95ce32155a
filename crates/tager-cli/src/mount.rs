//! `tager mount`: a directory of symlinks mirroring a tag's files.
//!
//! ```text
//! tager-music/
//! ├── -home-me-a.mp3 -> /home/me/a.mp3
//! └── jazz/                    (only with -r: one directory per reached tag)
//!     └── -home-me-b.mp3 -> /home/me/b.mp3
//! ```

use crate::output::warn;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tager_graph::{ClosureComputer, GraphNavigator, TagNode, TagStore, PATH_SEPARATOR};

/// Replaces the path separator in symlink names.
pub const LINK_NAME_SEPARATOR: &str = "-";

pub const MOUNT_PREFIX: &str = "tager-";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MountSummary {
    pub root: PathBuf,
    pub directories: usize,
    pub links: usize,
}

/// Build `into/tager-<tag>`. The root directory must not exist yet. Link
/// targets are not checked: a symlink to a missing file is still created.
pub fn mount(store: &TagStore, reference: &str, recursive: bool, into: &Path) -> Result<MountSummary> {
    let origin = GraphNavigator::new(store).resolve(reference)?;
    let root = into.join(format!("{MOUNT_PREFIX}{}", origin.name));
    fs::create_dir(&root).with_context(|| format!("creating {}", root.display()))?;

    let mut summary = MountSummary {
        root: root.clone(),
        directories: 1,
        links: 0,
    };
    summary.links += link_files(origin, &root);

    if recursive {
        for entry in ClosureComputer::new(store).walk(&origin.name)? {
            // The walk only yields tags that exist.
            let Some(node) = store.get(&entry.name) else {
                continue;
            };
            let dir = root.join(entry.relative_path());
            if let Err(err) = fs::create_dir(&dir) {
                warn(format_args!("tag {}: cannot create {}: {err}", node.name, dir.display()));
                continue;
            }
            summary.directories += 1;
            summary.links += link_files(node, &dir);
        }
    }

    tracing::info!(
        root = %summary.root.display(),
        directories = summary.directories,
        links = summary.links,
        "mounted tag"
    );
    Ok(summary)
}

pub fn link_name(target: &str) -> String {
    target.replace(PATH_SEPARATOR, LINK_NAME_SEPARATOR)
}

fn link_files(node: &TagNode, dir: &Path) -> usize {
    let mut linked = 0;
    for target in node.files.keys() {
        let link = dir.join(link_name(target));
        match symlink(Path::new(target), &link) {
            Ok(()) => linked += 1,
            Err(err) => warn(format_args!("{target}: {err}")),
        }
    }
    linked
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
