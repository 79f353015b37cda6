//! Cached random-file fixtures used as benchmark input data.
//!
//! Fixtures live in a shared cache keyed by (file count, file size) so
//! repeated runs reuse previously generated data. First-time generation
//! writes files in parallel; the cache itself is append-only and checked
//! for existence before creation (the sole coordination rule).

use anyhow::{Context, Result};
use rand::Rng;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const WRITE_CHUNK: usize = 1 << 20;

/// Predefined dataset size classes, or a literal byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSize {
    Nano,
    Mini,
    Small,
    Medium,
    Big,
    Giant,
    Bytes(u64),
}

impl FileSize {
    pub fn bytes(self) -> u64 {
        match self {
            FileSize::Nano => 64 * KIB,
            FileSize::Mini => 256 * KIB,
            FileSize::Small => 512 * KIB,
            FileSize::Medium => MIB,
            FileSize::Big => 5 * MIB,
            FileSize::Giant => 80 * MIB,
            FileSize::Bytes(bytes) => bytes,
        }
    }
}

/// Fixture directory name, keyed by file count and resolved byte size.
pub fn fixture_name(count: usize, size: FileSize) -> String {
    format!("data_{}_{}", count, size.bytes())
}

/// Materialize the (count, size) fixture in the shared cache, reusing it
/// when it already exists. Returns the fixture name and its cache path.
pub fn materialize(
    config: &HarnessConfig,
    count: usize,
    size: FileSize,
) -> Result<(String, PathBuf)> {
    let name = fixture_name(count, size);
    let dir = config.base_tmp.join("dvc_data").join(&name);
    if dir.exists() {
        return Ok((name, dir));
    }

    tracing::info!(fixture = %name, "generating fixture data");
    fs::create_dir_all(&dir)
        .with_context(|| format!("create fixture dir {}", dir.display()))?;
    let file_size = size.bytes();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(write_workers())
        .build()
        .context("build fixture writer pool")?;
    pool.install(|| {
        (0..count)
            .into_par_iter()
            .try_for_each(|index| random_file(&dir.join(format!("file_{index}")), file_size))
    })?;
    Ok((name, dir))
}

/// Copy every file in `src` into `dest`, creating it if needed and
/// overwriting files that already exist (datasets grow in place).
pub fn copy_into(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("create data dir {}", dest.display()))?;
    for entry in
        fs::read_dir(src).with_context(|| format!("read fixture {}", src.display()))?
    {
        let entry = entry.context("read fixture entry")?;
        fs::copy(entry.path(), dest.join(entry.file_name()))
            .with_context(|| format!("copy {}", entry.path().display()))?;
    }
    Ok(())
}

fn write_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus / 2).max(2)
}

fn random_file(path: &Path, file_size: u64) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let mut rng = rand::rng();
    let mut buf = vec![0u8; WRITE_CHUNK.min(file_size.max(1) as usize)];
    let mut remaining = file_size;
    while remaining > 0 {
        let len = buf.len().min(remaining as usize);
        rng.fill(&mut buf[..len]);
        out.write_all(&buf[..len])
            .with_context(|| format!("write {}", path.display()))?;
        remaining -= len as u64;
    }
    out.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
