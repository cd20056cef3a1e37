//! Error types for the MLOD library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for MLOD operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The buffer ended before a field could be fully read.
    ///
    /// `path` names the failing field relative to the record that was
    /// decoded, e.g. `Face.vertices[2].u`.
    #[error("Truncated input at {path} (offset {offset})")]
    TruncatedInput { path: String, offset: usize },

    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a truncation error for a single field.
    pub fn truncated(field: impl Into<String>, offset: usize) -> Self {
        Self::TruncatedInput {
            path: field.into(),
            offset,
        }
    }

    /// Prefix the field path with an enclosing record segment.
    ///
    /// Index segments (`[3]`) attach without a dot so that nesting reads
    /// `faces[3].vertices[2].u`.
    pub fn within(self, segment: impl AsRef<str>) -> Self {
        match self {
            Self::TruncatedInput { path, offset } => {
                let segment = segment.as_ref();
                let path = if path.is_empty() {
                    segment.to_string()
                } else if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                Self::TruncatedInput { path, offset }
            }
            other => other,
        }
    }

    /// Field path of a truncation error.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::TruncatedInput { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Check if this is a truncation error.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

/// Result type alias for MLOD operations.
pub type Result<T> = std::result::Result<T, Error>;
