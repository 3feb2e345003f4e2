//! # seedkeeper-archive
//!
//! Day-file discovery and SDS backfill: locate one day's archive files,
//! derive their place in the SDS tree from the SNCL in the file name, and
//! copy (or append onto) the destination day file.

pub mod backfill;
mod error;

pub use backfill::{
    backfill_file, backfill_files, destination_path, find_day_files, sncl_for, source_dir_for,
    BackfillSummary,
};
pub use error::ArchiveError;
