use assert_cmd::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("skilltree").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn stdout_json(output: std::process::Output) -> serde_json::Value {
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_prints_summary_with_start_class() {
    let exe = assert_cmd::cargo_bin!("skilltree-cli");
    let output = Command::new(exe)
        .args([
            "summary",
            "--options",
            fixture("sample_opts.json").to_string_lossy().as_ref(),
            fixture("sample_tree.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");

    let v = stdout_json(output);
    assert_eq!(v["nodes"], 11);
    assert_eq!(v["allocated"], serde_json::json!([200]));
    assert_eq!(v["width"], 2500.0);
}

#[test]
fn cli_classifies_allocated_nodes() {
    let exe = assert_cmd::cargo_bin!("skilltree-cli");
    let output = Command::new(exe)
        .args([
            "classify",
            "--allocate",
            "101",
            fixture("sample_tree.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");

    let v = stdout_json(output);
    let nodes = v.as_array().expect("array");
    assert_eq!(nodes.len(), 11);
    let keystone = nodes
        .iter()
        .find(|n| n["id"] == 103)
        .expect("keystone present");
    assert_eq!(keystone["draw_type"], "CanAllocate");
    assert_eq!(keystone["frame"], "KeystoneFrameCanAllocate");
    assert_eq!(keystone["state"], serde_json::json!([]));
}

#[test]
fn cli_reads_tree_from_stdin() {
    let text = std::fs::read_to_string(fixture("sample_tree.json")).expect("read fixture");
    let exe = assert_cmd::cargo_bin!("skilltree-cli");
    let assert = assert_cmd::Command::new(exe)
        .args(["connections", "-"])
        .write_stdin(text)
        .assert()
        .success();

    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is JSON");
    assert_eq!(v.as_array().map(|a| a.len()), Some(8));
}

#[test]
fn cli_rejects_unknown_flags_with_usage_exit_code() {
    let exe = assert_cmd::cargo_bin!("skilltree-cli");
    Command::new(exe)
        .args(["summary", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn cli_reports_unknown_node_as_failure() {
    let exe = assert_cmd::cargo_bin!("skilltree-cli");
    Command::new(exe)
        .args([
            "classify",
            "--allocate",
            "999",
            fixture("sample_tree.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);
}
