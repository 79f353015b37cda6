//! CLI argument parsing for the benchmark harness.

use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "dvc-bench",
    version,
    about = "Benchmark a data-versioning tool against multiple storage backends"
)]
pub struct RootArgs {
    /// Path to the environments config file (JSON)
    #[arg(value_name = "ENV_FILE")]
    pub env_file: PathBuf,

    /// How many times to repeat the full environment x story matrix
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub repeat: u32,

    /// Run only stories with these declared names (default: all stories)
    #[arg(long, value_name = "NAME", num_args = 0..)]
    pub stories: Option<Vec<String>>,
}
