//! Error types for seedkeeper-archive.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from backfill operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file name does not carry a `NET.STA.LOC.CHN` prefix.
    #[error("cannot read an SNCL from file name: {path}")]
    BadFileName { path: PathBuf },
}

/// Convenience constructor for [`ArchiveError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.into(),
        source,
    }
}
