//! Error types for level loading.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while reading or parsing level data.
#[derive(Debug)]
pub enum LevelError {
    /// An entity declaration (`Dot=` / `Goal=`) did not have exactly two fields.
    FieldCount {
        line: usize,
        key: String,
        got: usize,
    },
    /// A numeric field could not be parsed as an integer.
    BadNumber {
        line: usize,
        key: String,
        value: String,
    },
    /// The level file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Requested level index does not exist.
    OutOfRange { index: usize, count: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::FieldCount { line, key, got } => write!(
                f,
                "map load error on line {}: `{}` expects 2 fields, got {}",
                line, key, got
            ),
            LevelError::BadNumber { line, key, value } => write!(
                f,
                "map load error on line {}: `{}` has non-integer value `{}`",
                line, key, value
            ),
            LevelError::Io { path, source } => {
                write!(f, "failed to read level {}: {}", path.display(), source)
            }
            LevelError::OutOfRange { index, count } => {
                write!(f, "level index {} out of range (count: {})", index, count)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl LevelError {
    /// True for malformed level content (as opposed to I/O or indexing)
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LevelError::FieldCount { .. } | LevelError::BadNumber { .. }
        )
    }
}
