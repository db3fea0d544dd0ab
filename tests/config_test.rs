//! Tests for settings files.

use std::io::Write;
use tictactoe_timeline::{HistoryOrder, Settings};

#[test]
fn test_load_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "order = \"ascending\"\nshow_coordinates = false\nlog_filter = \"debug\""
    )
    .expect("write settings");

    let settings = Settings::load(Some(file.path())).expect("valid settings");
    assert_eq!(*settings.order(), HistoryOrder::Ascending);
    assert!(!*settings.show_coordinates());
    assert_eq!(settings.log_filter(), "debug");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Settings::load(Some(&dir.path().join("absent.toml"))).expect_err("missing file");
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "order = \"sideways\"").expect("write settings");

    let err = Settings::from_file(file.path()).expect_err("bad order");
    assert!(err.to_string().starts_with("Config error: Failed to parse config"));
}
