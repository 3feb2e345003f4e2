use rstest::rstest;
use seedkeeper_core::{mask, MaskSet, StationId};
use tempfile::TempDir;

#[rstest]
#[case::trailing_newline("CN_LMQ\nCN_BMRQ\n", vec!["CN_LMQ", "CN_BMRQ"])]
#[case::no_trailing_newline("CN_LMQ\nCN_BMRQ", vec!["CN_LMQ", "CN_BMRQ"])]
#[case::interior_blank("CN_LMQ\n\nCN_BMRQ\n", vec!["CN_LMQ", "CN_BMRQ"])]
#[case::whitespace_only_line("CN_LMQ\n  \nCN_BMRQ\n", vec!["CN_LMQ", "CN_BMRQ"])]
#[case::empty_file("", vec![])]
#[case::only_newlines("\n\n\n", vec![])]
fn load_is_insensitive_to_blank_lines(#[case] contents: &str, #[case] expected: Vec<&str>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("masked_stations");
    std::fs::write(&path, contents).unwrap();

    let loaded = mask::load(&path).expect("load");
    let entries: Vec<String> = loaded.iter().map(|s| s.to_string()).collect();
    assert_eq!(entries, expected);
}

#[test]
fn persist_then_load_preserves_insertion_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("masked_stations");

    let mut original = MaskSet::new();
    original.insert(StationId::from("CN_BMRQ"));
    original.insert(StationId::from("CN_A11"));
    original.insert(StationId::from("CN_LMQ"));

    mask::persist(&path, &original).expect("persist");
    let loaded = mask::load(&path).expect("load");
    assert_eq!(loaded, original);
}

#[test]
fn persist_overwrites_previous_contents_entirely() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("masked_stations");
    std::fs::write(&path, "CN_OLD\nCN_STALE\n").unwrap();

    let replacement: MaskSet = [StationId::from("CN_LMQ")].into_iter().collect();
    mask::persist(&path, &replacement).expect("persist");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "CN_LMQ\n");
}

#[test]
fn persist_into_missing_directory_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("masked_stations");

    let err = mask::persist(&path, &MaskSet::new()).unwrap_err();
    assert!(err.to_string().contains("no_such_dir"));
}
