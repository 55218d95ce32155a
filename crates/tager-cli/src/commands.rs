//! Tag, edge and query commands.
//!
//! Batch commands report per-item problems as warnings and keep going.
//! Structural errors (cycles, `.` without a current tag) abort before the
//! snapshot is saved, so nothing of the batch is persisted.

use crate::output::{done, tag_line, warn};
use crate::paths;
use crate::session::Session;
use anyhow::Result;
use std::path::Path;
use tager_graph::{ClosureComputer, GraphNavigator, SetQueryEngine, TagError, TagStore};

/// Turn a per-item result into "did it apply?", propagating fatal errors.
fn item(result: tager_graph::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_fatal() => Err(err.into()),
        Err(err) => {
            warn(err);
            Ok(false)
        }
    }
}

/// Resolve the tag a batch applies to; failing here aborts the command.
fn target(store: &TagStore, reference: &str) -> Result<String> {
    Ok(GraphNavigator::new(store).resolve(reference)?.name.clone())
}

// ============================================================================
// Tags
// ============================================================================

pub fn create(session: &mut Session, tags: &[String]) -> Result<()> {
    for tag in tags {
        if item(session.store.create(tag))? {
            done("created", tag);
        }
    }
    session.save()
}

pub fn delete(session: &mut Session, tags: &[String]) -> Result<()> {
    for tag in tags {
        match session.store.delete(tag) {
            Ok(node) => done("deleted", node.name),
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => warn(err),
        }
    }
    session.save()
}

pub fn list(store: &TagStore) {
    for node in store.nodes() {
        let marker = if store.current() == Some(node.name.as_str()) {
            "* "
        } else {
            "  "
        };
        println!("{marker}{}", tag_line(node));
    }
}

pub fn change_current(session: &mut Session, tag: &str) -> Result<()> {
    let name = session.store.set_current(tag)?;
    done("current tag:", name);
    session.save()
}

pub fn set_comment(session: &mut Session, tag: &str, words: &[String]) -> Result<()> {
    session.store.set_comment(tag, words.join(" "))?;
    session.save()
}

// ============================================================================
// Edges
// ============================================================================

pub fn add_tags(session: &mut Session, tag: &str, children: &[String]) -> Result<()> {
    let parent = target(&session.store, tag)?;
    for child in children {
        if item(session.store.link(&parent, child))? {
            done("linked", format_args!("{parent} -> {child}"));
        }
    }
    session.save()
}

pub fn remove_tags(session: &mut Session, tag: &str, children: &[String]) -> Result<()> {
    let parent = target(&session.store, tag)?;
    for child in children {
        if item(session.store.unlink(&parent, child))? {
            done("unlinked", format_args!("{parent} -> {child}"));
        }
    }
    session.save()
}

pub fn add_files(
    session: &mut Session,
    tag: &str,
    patterns: &[String],
    recursive: bool,
) -> Result<()> {
    let parent = target(&session.store, tag)?;
    for pattern in patterns {
        let files = match paths::expand(pattern, recursive, Path::new(".")) {
            Ok(files) => files,
            Err(err) => {
                warn(err);
                continue;
            }
        };
        if files.is_empty() {
            warn(TagError::FileNotFound(pattern.clone()));
            continue;
        }
        for file in files {
            if item(session.store.add_file(&parent, &file.absolute, &file.display))? {
                done("added", &file.display);
            }
        }
    }
    session.save()
}

/// Paths are made absolute without touching the disk, so files that were
/// already deleted can still be unregistered.
pub fn remove_files(session: &mut Session, tag: &str, files: &[String]) -> Result<()> {
    let parent = target(&session.store, tag)?;
    for file in files {
        let absolute = match paths::absolute(Path::new(file)) {
            Ok(absolute) => absolute,
            Err(err) => {
                warn(err);
                continue;
            }
        };
        if item(session.store.remove_file(&parent, &absolute))? {
            done("removed", file);
        }
    }
    session.save()
}

// ============================================================================
// Queries
// ============================================================================

pub fn show_tags(store: &TagStore, tag: &str, recursive: bool) -> Result<()> {
    let entries = ClosureComputer::new(store).child_tags(tag, recursive)?;
    for entry in entries {
        if recursive {
            println!("{}", entry.path);
            continue;
        }
        match store.get(&entry.name) {
            Some(node) => println!("{}", tag_line(node)),
            None => println!("{} (missing)", entry.name),
        }
    }
    Ok(())
}

/// Files of one tag, or the files shared by several.
pub fn show_files(store: &TagStore, tags: &[String], recursive: bool) -> Result<()> {
    for file in SetQueryEngine::new(store).intersect_files(tags, recursive)? {
        println!("{file}");
    }
    Ok(())
}

pub fn show_comment(store: &TagStore, tag: &str) -> Result<()> {
    if let Some(comment) = &GraphNavigator::new(store).resolve(tag)?.comment {
        println!("{comment}");
    }
    Ok(())
}

pub fn show_all(store: &TagStore, tag: &str, recursive: bool) -> Result<()> {
    show_comment(store, tag)?;
    println!();
    println!("tags:");
    show_tags(store, tag, recursive)?;
    println!();
    println!("files:");
    show_files(store, &[tag.to_string()], recursive)
}
