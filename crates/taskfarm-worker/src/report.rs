//! Per-task admission/execution reports, printed to the worker's own
//! standard streams. Never transported back to the dispatcher: result
//! collection is local printing only.

/// One task's outcome, admitted and run or skipped for lack of time.
pub enum Report {
    Ran {
        tasknum: u64,
        worker_id: String,
        command: String,
        success: bool,
        task_start: f64,
        task_end: f64,
        task_time: f64,
        walltime: f64,
        stdout: String,
        stderr: String,
    },
    Skipped {
        tasknum: u64,
        worker_id: String,
        command: String,
        walltime: f64,
        timeleft: f64,
        local_maxtime: f64,
        margin: f64,
    },
}

impl Report {
    /// Prints the structured header and captured stdout to the worker's
    /// stdout, and the captured stderr (or the skip diagnostic) to the
    /// worker's stderr.
    pub fn print(&self) {
        match self {
            Report::Ran {
                tasknum,
                worker_id,
                command,
                success,
                task_start,
                task_end,
                task_time,
                walltime,
                stdout,
                stderr,
            } => {
                println!("Task:{tasknum}:{worker_id}:Ran:{success}:{command}");
                println!(
                    "Timings:{tasknum}:{task_start:.2}:{task_end:.2}:{task_time:.2}:{walltime:.2}"
                );
                print_nonblank_lines("Stdout", *tasknum, stdout);
                eprint_nonblank_lines("Stderr", *tasknum, stderr);
            }
            Report::Skipped {
                tasknum,
                worker_id,
                command,
                walltime,
                timeleft,
                local_maxtime,
                margin,
            } => {
                println!("Task:{tasknum}:{worker_id}:Skipped:false:{command}");
                println!("Timings:{tasknum}:-1.00:-1.00:-1.00:{walltime:.2}");
                print_nonblank_lines("Stdout", *tasknum, "Insufficient Time");
                eprint_nonblank_lines(
                    "Stderr",
                    *tasknum,
                    &format!(
                        "Time left: {timeleft:.2}; Max Time: {local_maxtime:.2}; Margin: {margin:.2}"
                    ),
                );
            }
        }
    }
}

fn nonblank_lines(body: &str) -> Vec<&str> {
    body.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

fn print_nonblank_lines(label: &str, tasknum: u64, body: &str) {
    println!("{label}:{tasknum}:");
    for line in nonblank_lines(body) {
        println!("  {line}");
    }
}

fn eprint_nonblank_lines(label: &str, tasknum: u64, body: &str) {
    eprintln!("{label}:{tasknum}:");
    for line in nonblank_lines(body) {
        eprintln!("  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonblank_lines_drops_empty_and_whitespace_only_lines() {
        let body = "first\n\n  \nsecond  \n";
        assert_eq!(nonblank_lines(body), vec!["first", "second"]);
    }

    #[test]
    fn nonblank_lines_of_empty_body_is_empty() {
        assert!(nonblank_lines("").is_empty());
    }
}
