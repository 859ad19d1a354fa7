mod common;

use std::fs;

use actiondesc::{
    try_create_reducer, ActionError, AnyActionDesc, ComposeOptions, ConfigError, DuplicatePolicy,
};
use common::{add, inc};
use tempfile::TempDir;

#[test]
fn load_missing_file_returns_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = ComposeOptions::load(temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(options, ComposeOptions::default());
}

#[test]
fn load_reads_policy_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("compose.toml");
    fs::write(&path, "duplicates = \"reject\"\n").unwrap();

    let options = ComposeOptions::load(&path).unwrap();
    assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    assert!(options.allow_empty_type);
}

#[test]
fn load_reports_parse_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("compose.toml");
    fs::write(&path, "duplicates = [").unwrap();

    let err = ComposeOptions::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { path: ref failed, .. } if *failed == path));
    assert!(err.to_string().contains("compose.toml"));
    let err: ActionError = err.into();
    assert_eq!(err.error_type(), "config_error");
}

#[test]
fn strict_composition_rejects_duplicates() {
    let descs = [AnyActionDesc::from(add()), inc().into(), add().into()];
    let err = try_create_reducer(descs, 0_i64, &ComposeOptions::strict()).unwrap_err();
    assert!(matches!(err, ActionError::DuplicateType { ref action_type } if action_type == "ADD"));
}

#[test]
fn lenient_composition_accepts_duplicates() {
    let descs = [AnyActionDesc::from(add()), inc().into(), add().into()];
    let reducer = try_create_reducer(descs, 0_i64, &ComposeOptions::default()).unwrap();
    assert_eq!(reducer.len(), 2);
}
