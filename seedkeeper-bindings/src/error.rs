//! Error types for seedkeeper-bindings.
//!
//! Expected negative outcomes (a failed status check) are *values* — see
//! [`crate::control::Verification`]. Only infrastructure failures land here.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from catalog, binding, and control operations.
#[derive(Debug, Error)]
pub enum BindingsError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external tool could not be invoked at all (missing, not executable).
    #[error("failed to invoke `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog query produced no usable output within the timeout.
    #[error("`{command}` timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    /// Mask store failure from seedkeeper-core.
    #[error("mask store error: {0}")]
    Mask(#[from] seedkeeper_core::MaskStoreError),

    /// The rollback restart itself failed verification; the daemon is in an
    /// unknown state for every remaining station.
    #[error("daemon process '{process}' is not running after rollback restart")]
    DaemonUnrecoverable { process: String },
}

/// Convenience constructor for [`BindingsError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BindingsError {
    BindingsError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`BindingsError::Spawn`].
pub(crate) fn spawn_err(command: impl Into<String>, source: std::io::Error) -> BindingsError {
    BindingsError::Spawn {
        command: command.into(),
        source,
    }
}
