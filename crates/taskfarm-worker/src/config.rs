//! CLI configuration surface for the worker.

use anyhow::{Context, bail};
use clap::Parser;

use taskfarm_core::constants::{DEFAULT_JOBTIME_SECS, DEFAULT_PORT};
use taskfarm_core::time::parse_duration;

/// Runtime configuration for the `taskfarm-worker` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskfarm-worker",
    version,
    about = "Requests and executes tasks from a taskfarm dispatcher"
)]
pub struct CliArgs {
    /// Hostname or IP of the node running the dispatcher ("mother
    /// superior").
    ///
    /// Environment variable: `TASKFARM_HOST`
    #[arg(long, env = "TASKFARM_HOST")]
    pub host: String,

    /// Dispatcher port.
    ///
    /// Environment variable: `TASKFARM_PORT`
    #[arg(long, env = "TASKFARM_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Per-node worker index, used to build this worker's id
    /// (`<hostname>_<wrk_num>`). Assigned by the launcher when it spawns
    /// multiple worker processes on one node.
    ///
    /// Environment variable: `TASKFARM_WRK_NUM`
    #[arg(long, env = "TASKFARM_WRK_NUM")]
    pub wrk_num: usize,

    /// Wall-clock time available to this worker for the whole job
    /// (`ss`, `mm:ss`, `hh:mm:ss`, or `d:hh:mm:ss`).
    ///
    /// If omitted, falls back to the `PBS_WALLTIME` environment variable
    /// (as set by a Torque/PBS batch scheduler) and finally to one day.
    ///
    /// Environment variable: `TASKFARM_JOBTIME`
    #[arg(long, env = "TASKFARM_JOBTIME")]
    pub jobtime: Option<String>,
}

/// Validated worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub host: String,
    pub port: u16,
    pub worker_id: String,
    pub jobtime_secs: u64,
}

impl TryFrom<CliArgs> for WorkerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let local_hostname = hostname::get()
            .context("failed to determine local hostname")?
            .to_string_lossy()
            .into_owned();
        let worker_id = format!("{local_hostname}_{}", args.wrk_num);

        let jobtime_secs = match args.jobtime {
            Some(s) => parse_duration(&s)
                .map_err(|e| anyhow::anyhow!("invalid --jobtime {s:?}: {e}"))?,
            None => match std::env::var("PBS_WALLTIME") {
                Ok(s) if !s.is_empty() => parse_duration(&s)
                    .map_err(|e| anyhow::anyhow!("invalid PBS_WALLTIME {s:?}: {e}"))?,
                _ => DEFAULT_JOBTIME_SECS,
            },
        };

        if jobtime_secs == 0 {
            bail!("job time budget must be positive, got 0 seconds");
        }

        Ok(Self {
            host: args.host,
            port: args.port,
            worker_id,
            jobtime_secs,
        })
    }
}
