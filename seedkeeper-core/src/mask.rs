//! Persistent mask registry — stations permanently excluded from binding
//! attempts.
//!
//! # Storage layout
//!
//! Plain text, one `NETWORK_STATION` id per line, fully overwritten on every
//! persist. [`MaskSet`] itself is a pure ordered set; all file I/O lives in
//! the [`load`] / [`persist`] adapters.
//!
//! Masking is monotone within a run: stations are only ever appended here;
//! un-masking is an operator edit of the file between runs.

use std::path::Path;

use crate::error::{io_err, MaskStoreError};
use crate::types::StationId;

// ---------------------------------------------------------------------------
// MaskSet
// ---------------------------------------------------------------------------

/// Ordered set of masked stations. Preserves insertion order, rejects
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSet {
    entries: Vec<StationId>,
}

impl MaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, station: &StationId) -> bool {
        self.entries.contains(station)
    }

    /// Append `station` unless already present. Returns whether it was added.
    pub fn insert(&mut self, station: StationId) -> bool {
        if self.contains(&station) {
            return false;
        }
        self.entries.push(station);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationId> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<StationId> for MaskSet {
    fn from_iter<I: IntoIterator<Item = StationId>>(iter: I) -> Self {
        let mut set = Self::new();
        for station in iter {
            set.insert(station);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Load / persist adapters
// ---------------------------------------------------------------------------

/// Load the mask set from `path`.
///
/// A file that does not exist yet loads as an empty set. Blank lines are
/// dropped, so a trailing newline does not manufacture a phantom entry.
pub fn load(path: &Path) -> Result<MaskSet, MaskStoreError> {
    if !path.exists() {
        return Ok(MaskSet::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(StationId::from)
        .collect())
}

/// Overwrite the mask file at `path` with the whole set, exactly once.
///
/// Write flow: join entries → `.tmp` sibling → `rename`. The `.tmp` lives in
/// the same directory as the target, so the rename stays on one filesystem.
pub fn persist(path: &Path, mask: &MaskSet) -> Result<(), MaskStoreError> {
    let mut contents = mask
        .iter()
        .map(|s| s.0.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    tracing::debug!("writing {} masked stations to {}", mask.len(), path.display());

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &contents).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
