//! Scanner error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning for build tags.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory walk could not proceed
    #[error("Failed to walk {root}: {source}")]
    Discovery {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// A single file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be loaded
    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ScanError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        ScanError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}
