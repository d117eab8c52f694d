//! Checks that the worker's time-up latch never reverts once tripped, and
//! that the admission rule's soundness bound holds, exercised against the
//! pure admission rule without a network round trip.

#[path = "../src/admission.rs"]
mod admission;

use admission::has_time_for_another_task;

const MARGIN: f64 = 1.25;

/// Simulates a worker taking tasks of fixed duration against a shrinking
/// wall-time budget, and asserts that once the admission rule rejects a
/// task it never accepts one again (the `timeup` latch is monotone).
#[test]
fn latch_never_reverts_once_set() {
    let jobtime = 10.0_f64;
    let task_duration = 3.0_f64;
    let mut local_maxtime = 0.0_f64;
    let mut elapsed = 0.0_f64;
    let mut timeup = false;
    let mut skipped_once = false;

    for _ in 0..10 {
        let timeleft = jobtime - elapsed;
        let admitted = !timeup && has_time_for_another_task(timeleft, local_maxtime);

        if admitted {
            assert!(!skipped_once, "latch reverted from Skipped back to Ran");
            elapsed += task_duration;
            if task_duration > local_maxtime {
                local_maxtime = task_duration;
            }
        } else {
            timeup = true;
            skipped_once = true;
        }
    }

    assert!(skipped_once, "budget should have run out within 10 rounds");
}

/// Every admitted task satisfies
/// `walltime_at_decision + tasktime <= jobtime + local_maxtime * (margin - 1)`.
#[test]
fn admission_soundness_bound_holds() {
    let jobtime = 100.0_f64;
    let local_maxtime = 20.0_f64;
    let walltime_at_decision = 70.0_f64;
    let timeleft = jobtime - walltime_at_decision;

    assert!(has_time_for_another_task(timeleft, local_maxtime));

    // The admission rule guarantees timeleft > local_maxtime * MARGIN, i.e.
    // jobtime - walltime > local_maxtime * MARGIN, which rearranges to the
    // invariant's bound on any task whose tasktime <= local_maxtime.
    let bound = jobtime + local_maxtime * (MARGIN - 1.0);
    let worst_case_tasktime = local_maxtime;
    assert!(walltime_at_decision + worst_case_tasktime <= bound);
}
