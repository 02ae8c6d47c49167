//! Error types for the indexer
//!
//! Library code never terminates the process. Every fallible operation
//! returns an [`IndexError`] and the binary decides how to exit.

use std::path::PathBuf;

/// Result alias using [`IndexError`] by default
pub type Result<T, E = IndexError> = std::result::Result<T, E>;

/// Errors raised while building, saving or loading an index
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A growth request could not be satisfied
    ///
    /// Also raised when the 32-bit id or position space is exhausted.
    #[error("error allocating {requested_bytes} bytes")]
    Allocation { requested_bytes: usize },

    /// A file could not be opened, read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failure on a caller-supplied stream
    #[error(transparent)]
    Stream(#[from] std::io::Error),

    /// Persisted data is malformed
    #[error("corrupt index file {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// Two indexes that must cover the same corpus have different lengths
    #[error("corpus length mismatch: {left} vs {right} tokens")]
    Mismatch { left: usize, right: usize },
}

impl IndexError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }

    /// Allocation failure for `count` elements of `T`
    pub fn allocation<T>(count: usize) -> Self {
        IndexError::Allocation {
            requested_bytes: count.saturating_mul(std::mem::size_of::<T>()),
        }
    }
}
