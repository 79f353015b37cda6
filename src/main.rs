use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;
mod context;
mod fixture;
mod report;
mod runner;
mod stories;
mod story;
#[cfg(test)]
mod testutil;
mod workspace;

use cli::RootArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dvc_bench=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    run(&args)
}

fn run(args: &RootArgs) -> Result<()> {
    let bench = config::load(&args.env_file)?;
    preflight(&bench.harness)?;

    let stories = stories::all();
    let filter = args.stories.as_deref();
    for env in &bench.environments {
        let merged = runner::run_environment(
            env,
            &bench.harness,
            &stories,
            args.repeat,
            filter,
        )?;
        report::print(&env.name, &merged);
    }
    Ok(())
}

/// Resolve the external tools up front so a missing binary surfaces as a
/// configuration error before any story executes.
fn preflight(config: &config::HarnessConfig) -> Result<()> {
    for bin in [&config.git_bin, &config.dvc_bin] {
        which::which(bin).with_context(|| format!("{bin} not found on PATH"))?;
    }
    Ok(())
}
