//! Local process spawning: fire-and-forget, with no waiting on or
//! capturing of the child's output. The launcher's job is to get the
//! dispatcher and worker processes started on this node and then get out
//! of the way.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Resolves the path to another taskfarm binary, assumed to live alongside
/// this launcher binary (the normal layout for a workspace's `target/`
/// directory, or an installed `bin/` directory).
fn sibling_binary(name: &str) -> anyhow::Result<PathBuf> {
    let mut path = std::env::current_exe()
        .map_err(|e| anyhow::anyhow!("failed to determine launcher's own path: {e}"))?;
    path.pop();
    path.push(name);
    Ok(path)
}

pub fn spawn_dispatcher(
    port: u16,
    cmd: &str,
    inputs: &Path,
    allworkers: u64,
    start: usize,
) -> anyhow::Result<()> {
    let bin = sibling_binary("taskfarm-dispatcher")?;
    Command::new(&bin)
        .arg("--port")
        .arg(port.to_string())
        .arg("--cmd")
        .arg(cmd)
        .arg("--input")
        .arg(inputs)
        .arg("--allworkers")
        .arg(allworkers.to_string())
        .arg("--start")
        .arg(start.to_string())
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to spawn {bin:?}: {e}"))?;

    Ok(())
}

pub fn spawn_workers(
    mothersuperior: &str,
    port: u16,
    workers: usize,
    jobtime: Option<&str>,
) -> anyhow::Result<()> {
    let bin = sibling_binary("taskfarm-worker")?;

    for wrk_num in 0..workers {
        let mut command = Command::new(&bin);
        command
            .arg("--host")
            .arg(mothersuperior)
            .arg("--port")
            .arg(port.to_string())
            .arg("--wrk-num")
            .arg(wrk_num.to_string());

        if let Some(t) = jobtime {
            command.arg("--jobtime").arg(t);
        }

        command
            .spawn()
            .map_err(|e| anyhow::anyhow!("failed to spawn worker {wrk_num} ({bin:?}): {e}"))?;
    }

    Ok(())
}
