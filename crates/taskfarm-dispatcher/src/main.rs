#![doc = include_str!("../README.md")]

mod config;
mod input;
mod service;
mod state;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use taskfarm_core::proto::dispatch_server::DispatchServer;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

use config::{CliArgs, DispatcherConfig};
use service::DispatchService;
use state::Dispatcher;

/// Single-threaded on purpose: the dispatcher's counter and `maxtime` need
/// no locking because requests are handled strictly in arrival order. A
/// current-thread runtime makes that a property of the executor instead of
/// something `DispatchService` has to re-derive.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = DispatcherConfig::try_from(args)?;

    tracing::info!(start = config.start, "Dispatcher:Start");

    let dispatcher = Dispatcher::new(
        config.cmd.clone(),
        config.files.clone(),
        config.allworkers,
        config.start,
    );
    let service = DispatchService::new(dispatcher);
    let done = service.done_signal();

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.port);
    tracing::info!(%addr, "Dispatcher listening");

    Server::builder()
        .add_service(DispatchServer::new(service))
        .serve_with_shutdown(addr, async move {
            done.notified().await;
        })
        .await?;

    Ok(())
}
