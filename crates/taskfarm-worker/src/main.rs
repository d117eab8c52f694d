#![doc = include_str!("../README.md")]

mod admission;
mod client;
mod config;
mod exec;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{CliArgs, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = WorkerConfig::try_from(args)?;

    tracing::info!(worker = %config.worker_id, jobtime = config.jobtime_secs, "starting worker");

    client::run(config).await
}
