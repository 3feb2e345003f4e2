//! Day-file discovery and copy-or-append backfill into the SDS tree.
//!
//! # Layout
//!
//! ```text
//! source:      <parent>/<YYYY>/<MM>/<DD>/<SNCL>.D.<YYYY>.<JJJ>
//! destination: <sds>/<YYYY>/<NET>/<STA>/<CHN>.D/<SNCL>.D.<YYYY>.<JJJ>
//! ```
//!
//! Day files are sequences of self-contained records; an existing destination
//! gains the source's records appended, a fresh destination is a straight
//! copy.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use seedkeeper_core::Sncl;

use crate::error::{io_err, ArchiveError};

// ---------------------------------------------------------------------------
// Path arithmetic (pure, no I/O)
// ---------------------------------------------------------------------------

/// `<parent>/<YYYY>/<MM>/<DD>/`
pub fn source_dir_for(parent: &Path, date: NaiveDate) -> PathBuf {
    parent
        .join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(date.format("%d").to_string())
}

/// `<sds>/<YYYY>/<NET>/<STA>/<CHN>.D/<SNCL>.D.<YYYY>.<JJJ>`
pub fn destination_path(sds_root: &Path, date: NaiveDate, sncl: &Sncl) -> PathBuf {
    sds_root
        .join(date.format("%Y").to_string())
        .join(&sncl.network)
        .join(&sncl.station)
        .join(format!("{}.D", sncl.channel))
        .join(format!("{sncl}.D.{}", date.format("%Y.%j")))
}

/// SNCL from the first four dot-separated components of the file name.
pub fn sncl_for(path: &Path) -> Result<Sncl, ArchiveError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(Sncl::parse)
        .ok_or_else(|| ArchiveError::BadFileName {
            path: path.to_path_buf(),
        })
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Day files for `date` inside `directory`, matched by their `.YYYY.JJJ`
/// suffix, sorted by name.
pub fn find_day_files(directory: &Path, date: NaiveDate) -> Result<Vec<PathBuf>, ArchiveError> {
    let suffix = format!(".{}", date.format("%Y.%j"));
    let mut files: Vec<PathBuf> = std::fs::read_dir(directory)
        .map_err(|e| io_err(directory, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&suffix))
        })
        .collect();
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Backfill
// ---------------------------------------------------------------------------

/// Outcome of a backfill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Destinations created as fresh copies.
    pub copied: Vec<PathBuf>,
    /// Destinations that already existed and had records appended.
    pub merged: Vec<PathBuf>,
}

/// Copy `source` to `destination`, appending onto an existing day file.
///
/// Parent directories are created as needed. Returns whether the destination
/// already existed.
pub fn backfill_file(source: &Path, destination: &Path) -> Result<bool, ArchiveError> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    if destination.exists() {
        tracing::debug!(
            "appending {} onto {}",
            source.display(),
            destination.display()
        );
        let records = std::fs::read(source).map_err(|e| io_err(source, e))?;
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(destination)
            .map_err(|e| io_err(destination, e))?;
        file.write_all(&records).map_err(|e| io_err(destination, e))?;
        Ok(true)
    } else {
        tracing::debug!("copying {} to {}", source.display(), destination.display());
        std::fs::copy(source, destination).map_err(|e| io_err(destination, e))?;
        Ok(false)
    }
}

/// Backfill every file in `files` for `date` into the SDS tree at `sds_root`.
///
/// Files are processed in order; the first failure stops the run.
pub fn backfill_files(
    files: &[PathBuf],
    date: NaiveDate,
    sds_root: &Path,
) -> Result<BackfillSummary, ArchiveError> {
    let mut summary = BackfillSummary::default();
    for source in files {
        let sncl = sncl_for(source)?;
        let destination = destination_path(sds_root, date, &sncl);
        if backfill_file(source, &destination)? {
            summary.merged.push(destination);
        } else {
            summary.copied.push(destination);
        }
    }
    tracing::info!(
        "backfilled {} files ({} copied, {} merged)",
        summary.copied.len() + summary.merged.len(),
        summary.copied.len(),
        summary.merged.len()
    );
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
