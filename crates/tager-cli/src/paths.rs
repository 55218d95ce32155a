//! File arguments: glob expansion and absolute paths.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A file to register: the absolute key plus the path as the user wrote it
/// (or as the glob produced it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArg {
    pub absolute: String,
    pub display: String,
}

/// Absolute form of `path` with `.` and `..` folded away. Purely lexical:
/// the file does not have to exist.
pub fn absolute(path: &Path) -> Result<String> {
    let abs = std::path::absolute(path)
        .with_context(|| format!("cannot make {} absolute", path.display()))?;
    Ok(normalize(&abs).to_string_lossy().into_owned())
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Expand one pattern into the existing files it matches.
///
/// With `recursive`, the pattern is also applied inside every directory below
/// `base`.
pub fn expand(pattern: &str, recursive: bool, base: &Path) -> Result<Vec<FileArg>> {
    let mut patterns = vec![PathBuf::from(pattern)];
    if recursive {
        patterns.extend(subdirectories(base).map(|dir| dir.join(pattern)));
    }

    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for pattern in patterns {
        let text = pattern.to_string_lossy();
        let entries =
            glob::glob(&text).map_err(|e| anyhow!("invalid pattern `{text}`: {e}"))?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable glob match");
                    continue;
                }
            };
            let absolute = absolute(&path)?;
            if seen.insert(absolute.clone()) {
                out.push(FileArg {
                    absolute,
                    display: path.to_string_lossy().into_owned(),
                });
            }
        }
    }
    Ok(out)
}

/// Every directory strictly below `base`.
fn subdirectories(base: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(base)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tager_graph::{TagError, TagStore};

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();
        fs::write(dir.path().join("sub/deeper/d.txt"), "d").unwrap();
        dir
    }

    #[test]
    fn test_glob_matches_existing_files_only() {
        let dir = tree();
        let pattern = dir.path().join("*.txt");
        let found = expand(pattern.to_str().unwrap(), false, dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].absolute.ends_with("a.txt"));

        let missing = dir.path().join("nothing-*.bin");
        assert!(expand(missing.to_str().unwrap(), false, dir.path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_recursive_applies_pattern_in_subdirectories() {
        let dir = tree();
        let found = expand("*.txt", true, dir.path()).unwrap();
        let mut names: Vec<String> = found
            .iter()
            .map(|f| {
                Path::new(&f.absolute)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        assert!(names.contains(&"c.txt".to_string()));
        assert!(names.contains(&"d.txt".to_string()));
    }

    #[test]
    fn test_parent_segments_resolve_to_one_key() {
        let dir = tree();
        let plain = dir.path().join("a.txt");
        let dotted = dir.path().join("sub").join("..").join("a.txt");

        let first = expand(plain.to_str().unwrap(), false, dir.path()).unwrap();
        let second = expand(dotted.to_str().unwrap(), false, dir.path()).unwrap();
        assert_eq!(first[0].absolute, second[0].absolute);
        assert!(!second[0].absolute.contains(".."));

        let mut store = TagStore::new();
        store.create("t").unwrap();
        store
            .add_file("t", &first[0].absolute, &first[0].display)
            .unwrap();
        assert!(matches!(
            store.add_file("t", &second[0].absolute, &second[0].display),
            Err(TagError::DuplicateFile { .. })
        ));
        assert_eq!(store.get("t").unwrap().files.len(), 1);
    }

    #[test]
    fn test_removal_key_matches_for_deleted_file() {
        let dir = tree();
        let added = absolute(&dir.path().join("a.txt")).unwrap();
        fs::remove_file(dir.path().join("a.txt")).unwrap();
        let dotted = dir.path().join("sub/./deeper/../../a.txt");
        assert_eq!(absolute(&dotted).unwrap(), added);
    }

    #[test]
    fn test_absolute_does_not_require_existence() {
        let abs = absolute(Path::new("surely/not/here.txt")).unwrap();
        assert!(Path::new(&abs).is_absolute());
        assert!(abs.ends_with("here.txt"));
    }
}
