//! Shell task execution via `tokio::process::Command`, so a running task
//! does not block the worker's async runtime.

use tokio::process::Command;

/// Outcome of running one task's shell command to completion.
pub struct TaskOutcome {
    /// `true` when the captured stderr was empty. Exit codes are not
    /// assumed to be meaningful across arbitrary user scripts, so this
    /// stands in as a conservative, if imperfect, success proxy.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `command_line` through a shell, capturing stdout and stderr in
/// full. The child process inherits this worker's working directory and
/// environment.
///
/// There is no per-task timeout: a task that overruns the wall budget is
/// allowed to finish rather than be killed mid-flight.
pub async fn run_shell(command_line: &str) -> anyhow::Result<TaskOutcome> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command_line)
        .output()
        .await
        .map_err(|e| anyhow::anyhow!("failed to spawn task {command_line:?}: {e}"))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let success = stderr.is_empty();

    Ok(TaskOutcome {
        success,
        stdout,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_succeeds_on_empty_stderr() {
        let outcome = run_shell("echo hello").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.stdout.trim(), "hello");
        assert!(outcome.stderr.is_empty());
    }

    #[tokio::test]
    async fn nonempty_stderr_marks_failure_regardless_of_exit_code() {
        let outcome = run_shell("echo oops 1>&2").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.stderr.trim(), "oops");
    }
}
