//! Wire-level sentinels and tunables shared by the dispatcher and worker.

/// Sentinel `cmd` value instructing a worker to terminate.
pub const FINI: &str = "FINI";

/// Sentinel `file` value paired with [`FINI`].
pub const NONE_FILE: &str = "None";

/// Sentinel `maxtime` value meaning "time is up" / "shutdown in progress".
pub const TIME_UP: f64 = -1.0;

/// Safety factor applied to the observed `maxtime` when deciding whether a
/// worker has enough wall-clock time left to take another task.
///
/// Task durations exhibit jitter; `maxtime` is a sample maximum, not an
/// upper bound. Padding by 25% reduces the probability that a taken task
/// overruns the remaining budget.
pub const MARGIN: f64 = 1.25;

/// Default worker wall-time budget, in seconds, when neither `--jobtime` nor
/// `PBS_WALLTIME` is supplied: one day.
pub const DEFAULT_JOBTIME_SECS: u64 = 86_400;

/// Default dispatcher listen port.
pub const DEFAULT_PORT: u16 = 54321;
