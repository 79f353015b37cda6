//! Shared helpers for unit tests that drive stub external tools.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::TempDir;

use crate::config::HarnessConfig;

/// Write a stub executable named `name` into `dir` that exits with `code`.
pub fn write_stub_tool_with(dir: &Path, name: &str, code: i32) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\nexit {code}\n")).expect("write stub tool");
    let mut perms = fs::metadata(&path).expect("stat stub tool").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub tool");
    path.display().to_string()
}

/// Harness config rooted in a private temp dir, with always-succeeding stub
/// git/dvc tools.
pub fn stub_harness() -> (TempDir, HarnessConfig) {
    let tmp = TempDir::new().expect("create test tempdir");
    let config = HarnessConfig {
        base_tmp: tmp.path().join("tmp"),
        dvc_bin: write_stub_tool_with(tmp.path(), "dvc", 0),
        git_bin: write_stub_tool_with(tmp.path(), "git", 0),
    };
    (tmp, config)
}
