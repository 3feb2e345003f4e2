//! `seedkeeper backfill` — copy one day of archive files into the SDS tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use seedkeeper_archive::{backfill_files, find_day_files, source_dir_for};

/// Arguments for `seedkeeper backfill`.
#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Parent directory of the archive to copy files from.
    #[arg(long)]
    pub source_dir: PathBuf,

    /// Parent directory of the SDS archive to copy files to.
    #[arg(long)]
    pub sds_root: PathBuf,

    /// Day to backfill (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
}

impl BackfillArgs {
    pub fn run(self) -> Result<()> {
        let day_dir = source_dir_for(&self.source_dir, self.date);
        let files = find_day_files(&day_dir, self.date)
            .with_context(|| format!("failed to list day files in {}", day_dir.display()))?;

        if files.is_empty() {
            println!("no day files for {} in {}", self.date, day_dir.display());
            return Ok(());
        }

        let summary = backfill_files(&files, self.date, &self.sds_root)
            .with_context(|| format!("backfill failed for {}", self.date))?;

        println!(
            "✓ backfilled {} ({} copied, {} merged)",
            self.date,
            summary.copied.len(),
            summary.merged.len()
        );
        Ok(())
    }
}
