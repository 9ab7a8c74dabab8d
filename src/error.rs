//! Error types for `electroscan`
//!
//! Variants use `#[source]` to preserve the underlying cause so callers keep
//! the full error chain.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scan operations
#[derive(Debug, Error)]
pub enum ScanError {
    /// Registry access failed
    ///
    /// Fatal only for the enumeration of the root it occurred under; other
    /// roots are unaffected.
    #[error("Registry access failed: {0}")]
    Registry(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A confidently resolved icon file could not be read
    ///
    /// Unlike the filesystem probes during classification, this failure is
    /// surfaced: it fails the owning entry's resolution while leaving the
    /// rest of the scan untouched.
    #[error("Failed to read icon file {}: {source}", path.display())]
    IconRead {
        /// Path of the icon file
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
