//! `lf-cli` entry point.

use anyhow::Result;
use clap::Parser;
use lf_cli::{cli::Cli, commands};
use localflow_runtime::LoggingConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Default to warn so command output stays readable; override via RUST_LOG.
    let _guard =
        localflow_runtime::init_logging(&LoggingConfig::from_env("lf-cli").with_default_filter("warn"))?;

    let cli = Cli::parse();
    commands::run(cli).await
}
