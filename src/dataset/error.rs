//! Dataset-specific error types
//!
//! I/O failures carry the path they occurred on so batch reports can name
//! the offending file. A failed sidecar read, sidecar write, rename or
//! unlink is a hard failure for that single item; batch operations collect
//! these per item instead of aborting (see `summary.rs`).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by dataset and item operations
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Filesystem operation failed on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Soft-delete rename target already exists
    #[error("Cannot soft-delete: {target} already exists")]
    DeleteCollision { target: PathBuf },

    /// Invalid scan pattern for the dataset root
    #[error("Invalid scan pattern '{pattern}': {message}")]
    ScanPattern { pattern: String, message: String },
}

impl DatasetError {
    /// Attach a path to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
