//! Tests for loading the k-induction config.

use super::{CONFIG_FILE_NAME, InductionConfig};
use crate::induction_messages::induction_errors::ErrorType;
use std::fs;

#[test]
fn defaults_only_run_the_required_phases() {
    let config = InductionConfig::default();
    assert!(!config.duplicate_loop_body);
    assert!(config.forward_condition);
    assert!(!config.convert_asserts);
    assert!(!config.inserts_forward_condition());
}

#[test]
fn full_config_runs_everything() {
    let config = InductionConfig::full();
    assert!(config.inserts_forward_condition());
    assert!(config.convert_asserts);
}

#[test]
fn parses_the_k_induction_table() {
    let config = InductionConfig::from_toml_str(
        r#"
        [k_induction]
        duplicate_loop_body = true
        convert_asserts = true
        "#,
    )
    .unwrap();

    assert_eq!(
        config,
        InductionConfig {
            duplicate_loop_body: true,
            forward_condition: true,
            convert_asserts: true,
        }
    );
}

#[test]
fn missing_table_means_defaults() {
    let config = InductionConfig::from_toml_str("").unwrap();
    assert_eq!(config, InductionConfig::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let error = InductionConfig::from_toml_str(
        r#"
        [k_induction]
        unwind = 3
        "#,
    )
    .unwrap_err();

    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn wrong_value_types_are_rejected() {
    let error =
        InductionConfig::from_toml_str("[k_induction]\nforward_condition = \"yes\"\n").unwrap_err();
    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn loads_config_file_from_a_directory() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[k_induction]\nduplicate_loop_body = true\nforward_condition = false\n",
    )
    .expect("should write config");

    let config = InductionConfig::from_file(dir.path()).unwrap();

    assert!(config.duplicate_loop_body);
    assert!(!config.inserts_forward_condition());
}

#[test]
fn missing_config_file_is_a_file_error() {
    let dir = tempfile::tempdir().expect("should create temp dir");

    let error = InductionConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();

    assert_eq!(error.error_type, ErrorType::File);
    assert!(error.location.file.ends_with("nope.toml"));
}
