//! Per-station key binding files.
//!
//! One file per station under the daemon key directory; the file's existence
//! is the source of truth for "this station is configured".

use std::path::{Path, PathBuf};

use seedkeeper_core::StationId;

use crate::error::{io_err, BindingsError};

/// Binding files under one key directory (explicit constructor value).
#[derive(Debug, Clone)]
pub struct BindingStore {
    key_dir: PathBuf,
}

impl BindingStore {
    pub fn new(key_dir: impl Into<PathBuf>) -> Self {
        Self {
            key_dir: key_dir.into(),
        }
    }

    /// `<key_dir>/station_<NETWORK>_<STATION>` — pure, no I/O.
    pub fn path_for(&self, station: &StationId) -> PathBuf {
        self.key_dir.join(format!("station_{station}"))
    }

    pub fn exists(&self, station: &StationId) -> bool {
        self.path_for(station).exists()
    }

    /// Write the binding file, a single directive line `{process}:local`.
    ///
    /// Callers must check [`exists`](Self::exists) first; double-create is
    /// not guarded.
    pub fn create(&self, station: &StationId, process: &str) -> Result<(), BindingsError> {
        let path = self.path_for(station);
        tracing::debug!("writing key binding file {}", path.display());
        std::fs::write(&path, format!("{process}:local\n")).map_err(|e| io_err(&path, e))
    }

    /// Remove the binding file. Rollback-only; a missing file propagates,
    /// since rollback only ever follows a successful create.
    pub fn delete(&self, station: &StationId) -> Result<(), BindingsError> {
        let path = self.path_for(station);
        tracing::debug!("removing key binding file {}", path.display());
        std::fs::remove_file(&path).map_err(|e| io_err(&path, e))
    }
}
