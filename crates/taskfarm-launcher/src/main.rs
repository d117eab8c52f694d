#![doc = include_str!("../README.md")]

mod spawn;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskfarm_core::time::parse_duration;

#[derive(Parser, Debug)]
#[command(
    name = "taskfarm-launcher",
    version,
    about = "Spawns a taskfarm dispatcher or worker fleet on this node"
)]
struct Cli {
    #[command(subcommand)]
    role: Role,
}

#[derive(Subcommand, Debug)]
enum Role {
    /// Launch the dispatcher. Must be started before any workers.
    Dispatcher {
        /// Port for the dispatcher to listen on.
        #[arg(short, long, default_value_t = taskfarm_core::constants::DEFAULT_PORT)]
        port: u16,
        /// Command for workers to execute, called as `cmd file`.
        #[arg(short, long)]
        cmd: String,
        /// Path to the input list file (one task parameter per line).
        #[arg(short, long)]
        inputs: PathBuf,
        /// Total worker count across every node in the allocation.
        #[arg(short, long)]
        allworkers: u64,
        /// 1-based task number to start from (default 1).
        #[arg(short, long, default_value_t = 1)]
        start: usize,
    },
    /// Launch `n` workers on this node.
    Worker {
        /// Hostname of the node running the dispatcher.
        #[arg(short, long)]
        mothersuperior: String,
        /// Dispatcher port.
        #[arg(short, long, default_value_t = taskfarm_core::constants::DEFAULT_PORT)]
        port: u16,
        /// Number of workers to run on this node.
        #[arg(short, long)]
        workers: usize,
        /// Wall-clock time for the whole job (`ss`, `mm:ss`, `hh:mm:ss`, or
        /// `d:hh:mm:ss`). Defaults to one day if omitted.
        #[arg(short, long)]
        time: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.role {
        Role::Dispatcher {
            port,
            cmd,
            inputs,
            allworkers,
            start,
        } => {
            if allworkers == 0 {
                anyhow::bail!("--allworkers must be greater than 0");
            }
            spawn::spawn_dispatcher(port, &cmd, &inputs, allworkers, start)?;
        }
        Role::Worker {
            mothersuperior,
            port,
            workers,
            time,
        } => {
            if workers == 0 {
                anyhow::bail!("--workers must be greater than 0");
            }
            if let Some(t) = &time {
                // Validated here so a typo is a launcher-time configuration
                // error rather than a worker crash on a remote node.
                parse_duration(t).map_err(|e| anyhow::anyhow!("invalid --time {t:?}: {e}"))?;
            }
            spawn::spawn_workers(&mothersuperior, port, workers, time.as_deref())?;
        }
    }

    Ok(())
}
