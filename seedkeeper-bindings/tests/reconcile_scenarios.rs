//! End-to-end reconciliation scenarios against stub acquisition tools.
//!
//! The daemon control protocol is opaque text, so a shell script printing
//! `… is running` / `… is stopped` is a faithful stand-in for the real tool.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use seedkeeper_bindings::{
    pipeline::{run_blocking, UpdateConfig},
    BindingsError, RollbackFailure,
};
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    key_dir: PathBuf,
    mask_file: PathBuf,
    control_log: PathBuf,
    slink_tool: PathBuf,
    seiscomp_tool: PathBuf,
}

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

/// Stub tools: `slinktool` prints `catalog_lines`; `seiscomp` logs every
/// invocation and answers `status` with `seiscomp_status_body`.
fn fixture(catalog_lines: &str, seiscomp_status_body: &str) -> Fixture {
    let root = TempDir::new().unwrap();
    let key_dir = root.path().join("key");
    std::fs::create_dir_all(&key_dir).unwrap();
    let mask_file = root.path().join("masked_stations");
    let control_log = root.path().join("control.log");

    let slink_tool = root.path().join("slinktool");
    write_script(&slink_tool, &format!("printf '{catalog_lines}'"));

    let seiscomp_tool = root.path().join("seiscomp");
    write_script(
        &seiscomp_tool,
        &format!(
            "echo \"$1 $2\" >> {log}\nif [ \"$1\" = \"status\" ]; then\n{seiscomp_status_body}\nfi",
            log = control_log.display()
        ),
    );

    Fixture {
        _root: root,
        key_dir,
        mask_file,
        control_log,
        slink_tool,
        seiscomp_tool,
    }
}

fn config(fixture: &Fixture, on_rollback_failure: RollbackFailure) -> UpdateConfig {
    UpdateConfig {
        address: "192.0.2.1".to_string(),
        process: "autoslarchive".to_string(),
        mask_file: fixture.mask_file.clone(),
        key_dir: fixture.key_dir.clone(),
        slink_tool: fixture.slink_tool.clone(),
        seiscomp_tool: fixture.seiscomp_tool.clone(),
        command_timeout: Duration::from_secs(5),
        on_rollback_failure,
    }
}

fn binding_path(fixture: &Fixture, id: &str) -> PathBuf {
    fixture.key_dir.join(format!("station_{id}"))
}

const TWO_STATIONS: &str = "CN LMQA  Lac Madeleine, QC\\nCN BMRQ  Baie-des-Moutons, QC\\n";

#[test]
fn healthy_daemon_binds_every_station() {
    let fixture = fixture(TWO_STATIONS, "  echo \"$2 is running\"");

    let summary = run_blocking(&config(&fixture, RollbackFailure::Abort)).expect("run");

    assert_eq!(summary.bound.len(), 2);
    assert!(summary.masked.is_empty());
    assert!(summary.skipped.is_empty());
    for id in ["CN_LMQA", "CN_BMRQ"] {
        let contents = std::fs::read_to_string(binding_path(&fixture, id)).unwrap();
        assert_eq!(contents, "autoslarchive:local\n");
    }
    // Mask persisted exactly once, still empty.
    assert_eq!(std::fs::read_to_string(&fixture.mask_file).unwrap(), "");
}

#[test]
fn crashing_station_is_rolled_back_and_masked() {
    // The daemon goes down exactly while the second station's binding exists.
    let fixture = fixture(TWO_STATIONS, "  :");
    let status_body = format!(
        "  if [ -e {bad} ]; then echo \"$2 stopped\"; else echo \"$2 is running\"; fi",
        bad = binding_path(&fixture, "CN_BMRQ").display()
    );
    write_script(
        &fixture.seiscomp_tool,
        &format!(
            "echo \"$1 $2\" >> {log}\nif [ \"$1\" = \"status\" ]; then\n{status_body}\nfi",
            log = fixture.control_log.display()
        ),
    );

    let summary = run_blocking(&config(&fixture, RollbackFailure::Abort)).expect("run");

    assert_eq!(summary.bound, vec!["CN_LMQA".into()]);
    assert_eq!(summary.masked, vec!["CN_BMRQ".into()]);
    assert!(binding_path(&fixture, "CN_LMQA").exists());
    assert!(
        !binding_path(&fixture, "CN_BMRQ").exists(),
        "failed binding must be rolled back"
    );
    assert_eq!(
        std::fs::read_to_string(&fixture.mask_file).unwrap(),
        "CN_BMRQ\n"
    );
}

#[test]
fn masked_station_is_skipped_without_touching_the_daemon() {
    let fixture = fixture("CN LMQA  Lac Madeleine, QC\\n", "  echo \"$2 is running\"");
    std::fs::write(&fixture.mask_file, "CN_LMQA\n").unwrap();

    let summary = run_blocking(&config(&fixture, RollbackFailure::Abort)).expect("run");

    assert_eq!(summary.skipped, vec!["CN_LMQA".into()]);
    assert!(summary.bound.is_empty());
    assert!(!binding_path(&fixture, "CN_LMQA").exists());
    assert!(
        !fixture.control_log.exists(),
        "no control command may run for a masked station"
    );
    assert_eq!(
        std::fs::read_to_string(&fixture.mask_file).unwrap(),
        "CN_LMQA\n"
    );
}

#[test]
fn second_run_is_a_no_op() {
    let fixture = fixture(TWO_STATIONS, "  echo \"$2 is running\"");
    let config = config(&fixture, RollbackFailure::Abort);

    run_blocking(&config).expect("first run");
    let mask_after_first = std::fs::read_to_string(&fixture.mask_file).unwrap();

    let second = run_blocking(&config).expect("second run");
    assert!(second.bound.is_empty());
    assert!(second.masked.is_empty());
    assert_eq!(second.skipped.len(), 2);
    assert_eq!(
        std::fs::read_to_string(&fixture.mask_file).unwrap(),
        mask_after_first
    );
}

#[test]
fn previously_masked_stations_survive_a_run() {
    let fixture = fixture(TWO_STATIONS, "  echo \"$2 is running\"");
    std::fs::write(&fixture.mask_file, "CN_GONE\n").unwrap();

    run_blocking(&config(&fixture, RollbackFailure::Abort)).expect("run");

    let mask = std::fs::read_to_string(&fixture.mask_file).unwrap();
    assert!(
        mask.contains("CN_GONE"),
        "reconciler must never un-mask a station"
    );
}

#[test]
fn unrecoverable_rollback_aborts_and_persists_the_mask() {
    let fixture = fixture(TWO_STATIONS, "  echo \"$2 is stopped\"");

    let err = run_blocking(&config(&fixture, RollbackFailure::Abort)).unwrap_err();
    assert!(matches!(err, BindingsError::DaemonUnrecoverable { .. }));

    // The aborting station was masked and rolled back; the second station
    // was never attempted.
    assert!(!binding_path(&fixture, "CN_LMQA").exists());
    assert!(!binding_path(&fixture, "CN_BMRQ").exists());
    assert_eq!(
        std::fs::read_to_string(&fixture.mask_file).unwrap(),
        "CN_LMQA\n"
    );
}

#[test]
fn continue_policy_masks_every_failing_station() {
    let fixture = fixture(TWO_STATIONS, "  echo \"$2 is stopped\"");

    let summary = run_blocking(&config(&fixture, RollbackFailure::Continue)).expect("run");

    assert!(summary.bound.is_empty());
    assert_eq!(summary.masked, vec!["CN_LMQA".into(), "CN_BMRQ".into()]);
    assert!(!binding_path(&fixture, "CN_LMQA").exists());
    assert!(!binding_path(&fixture, "CN_BMRQ").exists());
    assert_eq!(
        std::fs::read_to_string(&fixture.mask_file).unwrap(),
        "CN_LMQA\nCN_BMRQ\n"
    );
}
