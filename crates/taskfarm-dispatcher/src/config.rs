//! CLI configuration surface for the dispatcher: a `clap::Parser` struct
//! with `env` fallbacks, converted via `TryFrom` into a validated runtime
//! config.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use crate::input::read_task_list;
use taskfarm_core::constants::DEFAULT_PORT;

/// Runtime configuration for the `taskfarm-dispatcher` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskfarm-dispatcher",
    version,
    about = "Hands out file-parameterized shell tasks to a worker fleet"
)]
pub struct CliArgs {
    /// Port to listen on for worker task requests.
    ///
    /// Environment variable: `TASKFARM_PORT`
    #[arg(long, env = "TASKFARM_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Command template every task is run with (a single process-wide
    /// constant; called as `cmd file` by each worker).
    ///
    /// Environment variable: `TASKFARM_CMD`
    #[arg(long, env = "TASKFARM_CMD")]
    pub cmd: String,

    /// Path to the input list file: one task parameter per line.
    ///
    /// Environment variable: `TASKFARM_INPUT`
    #[arg(long, env = "TASKFARM_INPUT")]
    pub input: PathBuf,

    /// Total worker count across every node in the allocation (workers per
    /// node times node count).
    ///
    /// Environment variable: `TASKFARM_ALLWORKERS`
    #[arg(long, env = "TASKFARM_ALLWORKERS")]
    pub allworkers: u64,

    /// 1-based task number to start from, to skip already-completed tasks
    /// from a previous partial run.
    ///
    /// Environment variable: `TASKFARM_START`
    #[arg(long, env = "TASKFARM_START", default_value_t = 1)]
    pub start: usize,
}

/// Validated dispatcher configuration, ready to build a
/// [`crate::state::Dispatcher`] from.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub port: u16,
    pub cmd: String,
    pub files: Vec<String>,
    pub allworkers: u64,
    pub start: usize,
}

impl TryFrom<CliArgs> for DispatcherConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.allworkers == 0 {
            bail!("--allworkers must be greater than 0");
        }

        let files = read_task_list(&args.input)?;

        if files.is_empty() {
            bail!("inputs file {:?} is empty", args.input);
        }

        if args.start == 0 {
            bail!("--start must be a 1-based task number (got 0)");
        }

        if args.start > files.len() {
            bail!(
                "--start ({}) exceeds the number of input lines ({})",
                args.start,
                files.len()
            );
        }

        Ok(Self {
            port: args.port,
            cmd: args.cmd,
            files,
            allworkers: args.allworkers,
            start: args.start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_with_input(input: PathBuf, allworkers: u64, start: usize) -> CliArgs {
        CliArgs {
            port: DEFAULT_PORT,
            cmd: "echo".to_string(),
            input,
            allworkers,
            start,
        }
    }

    fn temp_file_with_lines(lines: &[&str]) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "taskfarm-dispatcher-config-test-{}-{}",
            std::process::id(),
            lines.len()
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{}", lines.join("\n")).unwrap();
        path
    }

    #[test]
    fn rejects_zero_allworkers() {
        let input = temp_file_with_lines(&["a"]);
        let err = DispatcherConfig::try_from(args_with_input(input.clone(), 0, 1)).unwrap_err();
        assert!(err.to_string().contains("--allworkers"));
        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn rejects_empty_input_file() {
        let input = temp_file_with_lines(&[]);
        let err = DispatcherConfig::try_from(args_with_input(input.clone(), 1, 1)).unwrap_err();
        assert!(err.to_string().contains("empty"));
        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn rejects_start_past_end_of_input() {
        let input = temp_file_with_lines(&["a", "b", "c"]);
        let err = DispatcherConfig::try_from(args_with_input(input.clone(), 1, 10)).unwrap_err();
        assert!(err.to_string().contains("--start"));
        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn accepts_a_valid_configuration() {
        let input = temp_file_with_lines(&["a", "b", "c"]);
        let config = DispatcherConfig::try_from(args_with_input(input.clone(), 2, 2)).unwrap();
        assert_eq!(config.files, vec!["a", "b", "c"]);
        assert_eq!(config.start, 2);
        let _ = std::fs::remove_file(input);
    }
}
