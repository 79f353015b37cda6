//! Disposable per-run workspaces.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::HarnessConfig;

/// An isolated temporary directory owned by exactly one execution context.
/// The directory and everything in it are removed when the workspace is
/// dropped.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `<base_tmp>/projects`.
    pub fn provision(config: &HarnessConfig) -> Result<Self> {
        let base = config.base_tmp.join("projects");
        fs::create_dir_all(&base)
            .with_context(|| format!("create workspace root {}", base.display()))?;
        let dir = TempDir::new_in(&base).context("create workspace directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace now, surfacing cleanup errors instead of
    /// swallowing them in Drop.
    pub fn close(self) -> Result<()> {
        self.dir.close().context("remove workspace directory")
    }
}
