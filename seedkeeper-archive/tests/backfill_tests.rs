use std::path::PathBuf;

use chrono::NaiveDate;
use seedkeeper_archive::{backfill_files, destination_path, find_day_files, source_dir_for};
use seedkeeper_core::Sncl;
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
}

fn populate_source(root: &TempDir) -> PathBuf {
    let day_dir = source_dir_for(root.path(), date());
    std::fs::create_dir_all(&day_dir).unwrap();
    std::fs::write(day_dir.join("CN.LMQ..HHZ.D.2023.121"), b"lmq-records").unwrap();
    std::fs::write(day_dir.join("CN.BMRQ..HHZ.D.2023.121"), b"bmrq-records").unwrap();
    // Wrong day and non-file noise must be ignored.
    std::fs::write(day_dir.join("CN.LMQ..HHZ.D.2023.120"), b"yesterday").unwrap();
    std::fs::create_dir_all(day_dir.join("CN.FAKE..HHZ.D.2023.121")).unwrap();
    day_dir
}

#[test]
fn find_day_files_matches_suffix_only() {
    let source = TempDir::new().unwrap();
    let day_dir = populate_source(&source);

    let files = find_day_files(&day_dir, date()).expect("find");
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["CN.BMRQ..HHZ.D.2023.121", "CN.LMQ..HHZ.D.2023.121"]
    );
}

#[test]
fn find_day_files_reports_missing_directory() {
    let source = TempDir::new().unwrap();
    let err = find_day_files(&source.path().join("2023/05/02"), date()).unwrap_err();
    assert!(err.to_string().contains("2023/05/02"));
}

#[test]
fn fresh_destination_is_a_byte_identical_copy() {
    let source = TempDir::new().unwrap();
    let sds = TempDir::new().unwrap();
    let day_dir = populate_source(&source);

    let files = find_day_files(&day_dir, date()).unwrap();
    let summary = backfill_files(&files, date(), sds.path()).expect("backfill");

    assert_eq!(summary.copied.len(), 2);
    assert!(summary.merged.is_empty());

    let sncl = Sncl::parse("CN.LMQ..HHZ").unwrap();
    let dest = destination_path(sds.path(), date(), &sncl);
    assert_eq!(std::fs::read(dest).unwrap(), b"lmq-records");
}

#[test]
fn existing_destination_gains_appended_records() {
    let source = TempDir::new().unwrap();
    let sds = TempDir::new().unwrap();
    let day_dir = populate_source(&source);

    let sncl = Sncl::parse("CN.LMQ..HHZ").unwrap();
    let dest = destination_path(sds.path(), date(), &sncl);
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    std::fs::write(&dest, b"earlier-records|").unwrap();

    let files = find_day_files(&day_dir, date()).unwrap();
    let summary = backfill_files(&files, date(), sds.path()).expect("backfill");

    assert_eq!(summary.copied.len(), 1, "the other station is a fresh copy");
    assert_eq!(summary.merged, vec![dest.clone()]);
    assert_eq!(std::fs::read(dest).unwrap(), b"earlier-records|lmq-records");
}

#[test]
fn malformed_file_name_stops_the_run_with_its_path() {
    let sds = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    let bad = source.path().join("not-a-day-file");
    std::fs::write(&bad, b"noise").unwrap();

    let err = backfill_files(&[bad], date(), sds.path()).unwrap_err();
    assert!(err.to_string().contains("not-a-day-file"));
}
