//! Environment and harness configuration.
//!
//! The config file is a flat JSON document: every top-level key names one
//! environment (a string map with a reserved `remote_url` key), except the
//! reserved `config` section carrying harness-wide settings.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the base directory for workspaces and the fixture cache.
pub const BASE_TMP_ENV: &str = "BENCH_BASE_TMP";

/// Remote storage target for one environment: the base URL plus every
/// remaining key/value pair, applied as remote-specific settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub options: BTreeMap<String, String>,
}

/// One named storage backend. Immutable after load; each execution context
/// receives its own copy.
#[derive(Debug, Clone)]
pub struct EnvironmentSpec {
    pub name: String,
    pub remote: RemoteConfig,
}

/// Harness-wide settings, read once at startup and passed explicitly to
/// workspace provisioning and fixture generation.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub base_tmp: PathBuf,
    pub dvc_bin: String,
    pub git_bin: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_tmp: env::var_os(BASE_TMP_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            dvc_bin: "dvc".to_string(),
            git_bin: "git".to_string(),
        }
    }
}

/// Fully loaded benchmark configuration.
#[derive(Debug)]
pub struct BenchConfig {
    pub harness: HarnessConfig,
    pub environments: Vec<EnvironmentSpec>,
}

/// Reserved `config` section of the environments file.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    base_tmp: Option<PathBuf>,
    dvc_bin: Option<String>,
    git_bin: Option<String>,
}

pub fn load(path: &Path) -> Result<BenchConfig> {
    let bytes =
        fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    parse(&bytes)
}

fn parse(bytes: &[u8]) -> Result<BenchConfig> {
    let mut raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_slice(bytes).context("parse benchmark config JSON")?;

    let settings: RawSettings = match raw.remove("config") {
        Some(value) => {
            serde_json::from_value(value).context("parse reserved config section")?
        }
        None => RawSettings::default(),
    };

    let mut harness = HarnessConfig::default();
    if let Some(base_tmp) = settings.base_tmp {
        harness.base_tmp = base_tmp;
    }
    if let Some(dvc_bin) = settings.dvc_bin {
        harness.dvc_bin = dvc_bin;
    }
    if let Some(git_bin) = settings.git_bin {
        harness.git_bin = git_bin;
    }

    let mut environments = Vec::new();
    for (name, value) in raw {
        let mut pairs: BTreeMap<String, String> = serde_json::from_value(value)
            .with_context(|| format!("environment {name} must be a flat string map"))?;
        let url = pairs
            .remove("remote_url")
            .ok_or_else(|| anyhow!("environment {name} is missing remote_url"))?;
        environments.push(EnvironmentSpec {
            name,
            remote: RemoteConfig {
                url,
                options: pairs,
            },
        });
    }
    if environments.is_empty() {
        return Err(anyhow!("config declares no environments"));
    }

    Ok(BenchConfig {
        harness,
        environments,
    })
}
