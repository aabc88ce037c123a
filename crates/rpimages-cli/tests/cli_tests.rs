//! Tests running the `rpimages` binary against a temporary pack.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Pack root with one group of two images.
fn create_test_pack() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let gems = temp_dir.path().join("images").join("gems");
    fs::create_dir_all(&gems).unwrap();
    fs::write(gems.join("meta.json"), r#"{"item":"emerald"}"#).unwrap();
    fs::write(gems.join("ruby.png"), b"ruby").unwrap();
    fs::write(gems.join("jade.png"), b"jade").unwrap();
    temp_dir
}

fn run_cli(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rpimages"))
        .arg("--pack-root")
        .arg(root)
        .arg("--source")
        .arg(root.join("images"))
        .arg("--summary")
        .arg(root.join("key_info.json"))
        .args(extra)
        .output()
        .expect("Failed to run rpimages")
}

#[test]
fn test_cli_builds_pack() {
    let temp_dir = create_test_pack();
    let output = run_cli(temp_dir.path(), &[]);
    assert!(output.status.success(), "{:?}", output);

    let summary: Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("key_info.json")).unwrap())
            .unwrap();
    assert_eq!(summary["gems"]["item"], "emerald");
    assert_eq!(summary["gems"]["jade"], 1);
    assert_eq!(summary["gems"]["ruby"], 2);

    assert!(temp_dir
        .path()
        .join("assets/minecraft/models/item/emerald.json")
        .exists());
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let temp_dir = create_test_pack();
    let output = run_cli(temp_dir.path(), &["--dry-run"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(!temp_dir.path().join("key_info.json").exists());
    assert!(!temp_dir.path().join("assets").exists());
}

#[test]
fn test_cli_missing_source_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_corrupt_table_exit_code() {
    let temp_dir = create_test_pack();
    let item_dir = temp_dir.path().join("assets/minecraft/models/item");
    fs::create_dir_all(&item_dir).unwrap();
    fs::write(item_dir.join("emerald.json"), "not json").unwrap();

    let output = run_cli(temp_dir.path(), &[]);
    assert_eq!(output.status.code(), Some(3));
}
