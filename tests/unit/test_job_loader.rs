use pipewright::core::job::{load_document, load_jobs};
use pipewright::core::types::ErrorCategory;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID_JOBS: &str = r#"
jobs:
  - stage: check-patch
    distro: el9
    arch: x86_64
    options:
      script: check.sh
      containers: docker.io/centos
  - stage: build
    substage: rpm
    distro: fc41
    arch: aarch64
"#;

const EMPTY_STAGE: &str = r#"
jobs:
  - stage: ""
    distro: el9
    arch: x86_64
"#;

fn write_jobs(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_valid_document_loads_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", VALID_JOBS);

    let threads = load_jobs(&path).unwrap();
    assert_eq!(threads.len(), 2);

    assert_eq!(threads[0].stage, "check-patch");
    assert_eq!(threads[0].distro, "el9");
    assert_eq!(threads[0].arch, "x86_64");
    assert_eq!(threads[0].options.get("script"), Some(&json!("check.sh")));
    assert_eq!(
        threads[0].options.get("containers"),
        Some(&json!("docker.io/centos"))
    );

    assert_eq!(threads[1].stage, "build");
    assert_eq!(threads[1].substage, "rpm");
}

#[test]
fn test_substage_defaults_when_omitted() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", VALID_JOBS);

    let threads = load_jobs(&path).unwrap();
    assert_eq!(threads[0].substage, "default");
}

#[test]
fn test_options_default_to_empty_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", VALID_JOBS);

    let threads = load_jobs(&path).unwrap();
    assert!(threads[1].options.is_empty());
}

#[test]
fn test_json_document_also_parses() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(
        &dir,
        "jobs.json",
        r#"{"jobs": [{"stage": "build", "distro": "el9", "arch": "x86_64"}]}"#,
    );

    let threads = load_jobs(&path).unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].coordinate(), "build/default/el9/x86_64");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.yaml");

    let err = load_jobs(&path).unwrap_err();
    assert_eq!(err.category, ErrorCategory::IoError);
    assert!(err.message.contains("Failed to read job definitions"));
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", "jobs: [unterminated");

    let err = load_jobs(&path).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ParseError);
    assert!(err.message.contains("Failed to parse job definitions"));
    assert!(err.source.is_some());
}

#[test]
fn test_missing_stage_field_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", "jobs:\n  - distro: el9\n    arch: x86_64\n");

    let err = load_jobs(&path).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ParseError);
}

#[test]
fn test_empty_stage_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", EMPTY_STAGE);

    let err = load_jobs(&path).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
    assert!(err.message.contains("job 0: stage must not be empty"));
}

#[test]
fn test_whitespace_coordinate_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(
        &dir,
        "jobs.yaml",
        "jobs:\n  - stage: build\n    distro: '  '\n    arch: x86_64\n",
    );

    let err = load_jobs(&path).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
    assert!(err.message.contains("distro must not be empty"));
}

#[test]
fn test_load_document_skips_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_jobs(&dir, "jobs.yaml", EMPTY_STAGE);

    let document = load_document(&path).unwrap();
    assert_eq!(document.jobs.len(), 1);
    assert_eq!(document.jobs[0].stage, "");
}
