//! Errors raised by the tag graph engine.

use thiserror::Error;

pub type Result<T, E = TagError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag `{0}` does not exist")]
    TagNotFound(String),

    #[error("file `{0}` does not exist")]
    FileNotFound(String),

    #[error("tag `{0}` already exists")]
    DuplicateTag(String),

    #[error("tag `{tag}` already contains tag `{child}`")]
    DuplicateEdge { tag: String, child: String },

    #[error("file `{path}` is already registered in tag `{tag}`")]
    DuplicateFile { tag: String, path: String },

    #[error("adding this edge would create a cycle: {path}")]
    Cycle { path: String },

    #[error("invalid tag name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("`.` was used but no current tag is set (see `tager ch`)")]
    NoCurrentTag,

    #[error("no tags given")]
    EmptyQuery,
}

impl TagError {
    /// Structural errors abort the whole command; everything else is a
    /// per-item warning inside a batch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TagError::Cycle { .. } | TagError::NoCurrentTag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(TagError::NoCurrentTag.is_fatal());
        assert!(TagError::Cycle {
            path: "a -> a".into()
        }
        .is_fatal());
        assert!(!TagError::DuplicateTag("a".into()).is_fatal());
        assert!(!TagError::TagNotFound("a".into()).is_fatal());
    }

    #[test]
    fn test_messages_name_the_item() {
        let err = TagError::DuplicateFile {
            tag: "music".into(),
            path: "/tmp/a.mp3".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("music"));
        assert!(msg.contains("/tmp/a.mp3"));
    }
}
