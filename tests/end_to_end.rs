//! Harness binary behavior around configuration and fatal errors.
//!
//! The registered stories move hundreds of megabytes of fixture data, so
//! these tests exercise the CLI surface and error taxonomy with stub tools
//! and an empty story selection; scenario semantics are covered by unit
//! tests against lightweight stories.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_stub_tool(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write stub tool");
    let mut perms = fs::metadata(&path).expect("stat stub tool").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub tool");
    path.display().to_string()
}

fn write_env_file(tmp: &TempDir) -> std::path::PathBuf {
    let dvc = write_stub_tool(tmp.path(), "dvc");
    let git = write_stub_tool(tmp.path(), "git");
    let config = serde_json::json!({
        "local": { "remote_url": tmp.path().join("remote").display().to_string() },
        "config": {
            "base_tmp": tmp.path().join("tmp").display().to_string(),
            "dvc_bin": dvc,
            "git_bin": git,
        }
    });
    let env_file = tmp.path().join("env.json");
    fs::write(&env_file, config.to_string()).expect("write env file");
    env_file
}

#[test]
fn missing_config_file_aborts_with_a_diagnostic() {
    let output = Command::new(env!("CARGO_BIN_EXE_dvc-bench"))
        .arg("/nonexistent/envs.json")
        .output()
        .expect("run harness");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read config"), "stderr: {stderr}");
}

#[test]
fn missing_remote_url_aborts_before_any_story() {
    let tmp = TempDir::new().expect("tempdir");
    let env_file = tmp.path().join("env.json");
    fs::write(&env_file, r#"{ "broken": { "verify": "true" } }"#).expect("write env file");

    let output = Command::new(env!("CARGO_BIN_EXE_dvc-bench"))
        .arg(&env_file)
        .output()
        .expect("run harness");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("remote_url"), "stderr: {stderr}");
    assert!(!tmp.path().join("tmp").exists());
}

#[test]
fn unknown_tool_binary_is_a_configuration_error() {
    let tmp = TempDir::new().expect("tempdir");
    let config = serde_json::json!({
        "local": { "remote_url": "/tmp/remote" },
        "config": { "dvc_bin": "/nonexistent/dvc" }
    });
    let env_file = tmp.path().join("env.json");
    fs::write(&env_file, config.to_string()).expect("write env file");

    let output = Command::new(env!("CARGO_BIN_EXE_dvc-bench"))
        .arg(&env_file)
        .output()
        .expect("run harness");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found on PATH"), "stderr: {stderr}");
}

#[test]
fn empty_story_selection_still_reports_each_environment() {
    let tmp = TempDir::new().expect("tempdir");
    let env_file = write_env_file(&tmp);

    let output = Command::new(env!("CARGO_BIN_EXE_dvc-bench"))
        .arg(&env_file)
        .args(["--repeat", "1", "--stories", "no such story"])
        .output()
        .expect("run harness");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("local"), "stdout: {stdout}");
    assert!(stdout.contains("===="), "stdout: {stdout}");
    assert!(!stdout.contains("Story:"), "stdout: {stdout}");
}

#[test]
fn bare_stories_flag_runs_nothing_but_succeeds() {
    let tmp = TempDir::new().expect("tempdir");
    let env_file = write_env_file(&tmp);

    let output = Command::new(env!("CARGO_BIN_EXE_dvc-bench"))
        .arg(&env_file)
        .args(["--repeat", "1", "--stories"])
        .output()
        .expect("run harness");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Story:"));
}
