//! Error types for seedkeeper-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from mask store operations.
#[derive(Debug, Error)]
pub enum MaskStoreError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`MaskStoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> MaskStoreError {
    MaskStoreError::Io {
        path: path.into(),
        source,
    }
}
