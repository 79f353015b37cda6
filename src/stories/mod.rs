//! Static registry of benchmark stories.

mod basics;
mod giant_file;
mod status;

use anyhow::{Context, Result};
use std::fs;

use crate::context::ExecutionContext;
use crate::story::Story;

/// Every story known to the harness, in registration order.
pub fn all() -> Vec<Story> {
    vec![basics::STORY, status::STORY, giant_file::STORY]
}

/// Tracking-file name for a registered data directory, following the tool's
/// sidecar convention.
fn sidecar(name: &str) -> String {
    format!("{name}.dvc")
}

/// Delete a data directory inside the workspace (untimed story mutation).
fn remove_data_dir(ctx: &ExecutionContext, name: &str) -> Result<()> {
    let path = ctx.path_in_workspace(name);
    fs::remove_dir_all(&path).with_context(|| format!("remove {}", path.display()))
}
