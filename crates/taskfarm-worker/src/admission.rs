//! The admission rule deciding whether a worker has enough wall-clock time
//! left to take another task.

use taskfarm_core::constants::MARGIN;

/// Returns `true` when `timeleft` comfortably covers another task of
/// length up to `local_maxtime`, padded by [`MARGIN`] to absorb jitter in
/// task durations (`local_maxtime` is a sample maximum, not an upper
/// bound).
pub fn has_time_for_another_task(timeleft: f64, local_maxtime: f64) -> bool {
    timeleft > local_maxtime * MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_when_plenty_of_time_remains() {
        assert!(has_time_for_another_task(100.0, 10.0));
    }

    #[test]
    fn rejects_when_margin_not_satisfied() {
        // timeleft == maxtime * margin exactly: the rule is a strict `>`.
        assert!(!has_time_for_another_task(12.5, 10.0));
    }

    #[test]
    fn admits_first_task_with_zero_observed_maxtime() {
        assert!(has_time_for_another_task(1.0, 0.0));
    }

    #[test]
    fn rejects_when_no_time_remains() {
        assert!(!has_time_for_another_task(0.0, 0.0));
        assert!(!has_time_for_another_task(-5.0, 1.0));
    }
}
