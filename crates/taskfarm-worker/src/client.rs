//! The worker's main loop: request, decide, execute, report.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use taskfarm_core::constants::{FINI, MARGIN, TIME_UP};
use taskfarm_core::proto::TaskRequest;
use taskfarm_core::proto::dispatch_client::DispatchClient;
use tonic::transport::Channel;

use crate::admission::has_time_for_another_task;
use crate::config::WorkerConfig;
use crate::exec::run_shell;
use crate::report::Report;

/// Runs the worker loop to completion: request a task, decide whether
/// there is time to run it, execute or skip, report, repeat until a
/// `FINI` reply is received.
pub async fn run(config: WorkerConfig) -> anyhow::Result<()> {
    let endpoint = format!("http://{}:{}", config.host, config.port);
    let channel = Channel::from_shared(endpoint)?.connect().await?;
    let mut client = DispatchClient::new(channel);

    let t0 = Instant::now();
    let mut local_maxtime: f64 = 0.0;
    let mut tasknum: u64 = 0;
    let mut timeup = false;

    loop {
        let request = TaskRequest {
            worker_id: config.worker_id.clone(),
            maxtime: if timeup { TIME_UP } else { local_maxtime },
            last_task: tasknum,
        };

        let reply = client.request_task(request).await?.into_inner();

        if reply.cmd == FINI {
            tracing::info!(worker = %config.worker_id, "worker received FINI, terminating");
            return Ok(());
        }

        if reply.maxtime > local_maxtime {
            local_maxtime = reply.maxtime;
        }
        tasknum = reply.tasknum;

        let walltime = t0.elapsed().as_secs_f64();
        let timeleft = config.jobtime_secs as f64 - walltime;
        let command = format!("{} {}", reply.cmd, reply.file);

        if has_time_for_another_task(timeleft, local_maxtime) {
            tracing::info!(
                worker = %config.worker_id,
                tasknum,
                walltime,
                timeleft,
                "Taking"
            );

            let task_start = now_epoch_secs();
            let task_start_instant = Instant::now();
            let outcome = run_shell(&command).await?;
            let task_time = task_start_instant.elapsed().as_secs_f64();
            let task_end = now_epoch_secs();

            if task_time > local_maxtime {
                local_maxtime = task_time;
            }
            let walltime_after = t0.elapsed().as_secs_f64();

            Report::Ran {
                tasknum,
                worker_id: config.worker_id.clone(),
                command,
                success: outcome.success,
                task_start,
                task_end,
                task_time,
                walltime: walltime_after,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
            }
            .print();
        } else {
            timeup = true;
            tracing::warn!(
                worker = %config.worker_id,
                tasknum,
                walltime,
                timeleft,
                "Skipping"
            );

            Report::Skipped {
                tasknum,
                worker_id: config.worker_id.clone(),
                command,
                walltime,
                timeleft,
                local_maxtime,
                margin: MARGIN,
            }
            .print();
        }
    }
}

fn now_epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
