//! One disposable, fully-initialized environment for the tool under test.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

use crate::config::{EnvironmentSpec, HarnessConfig};
use crate::fixture::{self, FileSize};
use crate::workspace::Workspace;

/// Binds a workspace to one environment's configuration. Created fresh per
/// (environment, story, repeat); never shared across stories or repeats.
pub struct ExecutionContext {
    workspace: Workspace,
    config: HarnessConfig,
    remote_url: String,
    remote_options: BTreeMap<String, String>,
}

impl ExecutionContext {
    /// Bind a fresh workspace to one environment. The remote destination
    /// gets a unique suffix so contexts sharing a base `remote_url` never
    /// push to the same namespace.
    pub fn new(workspace: Workspace, env: &EnvironmentSpec, config: &HarnessConfig) -> Self {
        Self {
            workspace,
            config: config.clone(),
            remote_url: unique_remote_url(&env.remote.url),
            remote_options: env.remote.options.clone(),
        }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Absolute path of a file or directory inside the workspace.
    pub fn path_in_workspace(&self, rel: &str) -> PathBuf {
        self.workspace.path().join(rel)
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Create the git/dvc repository state in the workspace and register
    /// the default remote with every environment option applied. Must be
    /// called exactly once, before any story step runs; any command failure
    /// invalidates the whole run.
    pub fn initialize(&self) -> Result<()> {
        self.run_checked(&self.config.git_bin, &["init"])?;
        self.dvc(&["init"])?;
        let url = self.remote_url.clone();
        self.dvc(&["remote", "add", "-d", "default", &url])?;
        for (key, value) in &self.remote_options {
            self.dvc(&["remote", "modify", "default", key, value])?;
        }
        Ok(())
    }

    /// Invoke the tool under test in the workspace, blocking until it
    /// exits. Non-zero exit is a hard error; there is no timeout.
    pub fn dvc(&self, args: &[&str]) -> Result<()> {
        self.run_checked(&self.config.dvc_bin, args)
    }

    /// Copy the (count, size) fixture into the workspace under `name`
    /// (default: the fixture's own name), register it with the tool, and
    /// return the directory name used.
    pub fn generate_data(
        &self,
        count: usize,
        size: FileSize,
        name: Option<&str>,
    ) -> Result<String> {
        let (fixture_name, cache_dir) = fixture::materialize(&self.config, count, size)?;
        let name = name.unwrap_or(&fixture_name).to_string();
        fixture::copy_into(&cache_dir, &self.workspace.path().join(&name))?;
        self.dvc(&["add", &name])?;
        Ok(name)
    }

    /// Drop the local object cache, forcing the next pull to go remote.
    /// A cache that was never populated is treated as already cold.
    pub fn clear_cache(&self) -> Result<()> {
        let cache = self.workspace.path().join(".dvc").join("cache");
        match fs::remove_dir_all(&cache) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("remove cache {}", cache.display()))
            }
        }
    }

    /// Tear the workspace down, surfacing cleanup errors.
    pub fn close(self) -> Result<()> {
        self.workspace.close()
    }

    fn run_checked(&self, program: &str, args: &[&str]) -> Result<()> {
        tracing::debug!(program, ?args, "run");
        let status = Command::new(program)
            .args(args)
            .current_dir(self.workspace.path())
            .status()
            .with_context(|| format!("spawn {program}"))?;
        if !status.success() {
            return Err(anyhow!(
                "{program} {} failed with {status}",
                args.join(" ")
            ));
        }
        Ok(())
    }
}

fn unique_remote_url(base: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), Uuid::new_v4())
}
