//! The dispatcher's task-handout and drain state machine.
//!
//! [`Dispatcher::handle_request`] is the single entry point: it is called
//! once per inbound `TaskRequest`, in arrival order, and returns the
//! `TaskReply` to send back. Keeping this as a plain synchronous method
//! (rather than inlining it into the gRPC handler) makes the state machine
//! directly unit-testable without standing up a server.

use std::collections::HashSet;

use taskfarm_core::constants::{FINI, NONE_FILE, TIME_UP};
use taskfarm_core::proto::{TaskReply, TaskRequest};
use taskfarm_core::Error;

/// The three states of the dispatcher's task-handout/drain state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Handing real task assignments out of `files`.
    HandingOut,
    /// Input exhausted or a timeout has been seen; servicing the remaining
    /// `FINI` rounds.
    Draining,
    /// All `FINI` rounds serviced. Terminal.
    Done,
}

/// Owns the task list, the cluster-wide `maxtime` estimate, and the
/// handout/drain state machine.
pub struct Dispatcher {
    cmd: String,
    files: Vec<String>,
    /// Index into `files` of the next task to hand out.
    cursor: usize,
    /// Next-assigned sequence number; monotone nondecreasing.
    tasknum: u64,
    /// >= 0 while handing out tasks; TIME_UP once any worker reports
    /// insufficient time.
    maxtime: f64,
    known_workers: HashSet<String>,
    already_notified: u64,
    /// Smallest `last_task` reported by a timed-out worker, or the highest
    /// assigned `tasknum` if input was exhausted before any timeout.
    lasttask: u64,
    allworkers: u64,
    /// Remaining `FINI` rounds to service in [`Phase::Draining`].
    shutdown_remaining: u64,
    phase: Phase,
}

impl Dispatcher {
    /// Builds a dispatcher ready to serve `files[start - 1..]`.
    ///
    /// Callers must validate `!files.is_empty()` and `start <= files.len()`
    /// beforehand (see `taskfarm_dispatcher::config`); those are
    /// configuration errors reported before any socket is opened, not
    /// conditions this type re-validates.
    pub fn new(cmd: String, files: Vec<String>, allworkers: u64, start: usize) -> Self {
        debug_assert!(!files.is_empty());
        debug_assert!(start >= 1 && start <= files.len());

        let cursor = start - 1;
        Self {
            cmd,
            files,
            cursor,
            tasknum: cursor as u64,
            maxtime: 0.0,
            known_workers: HashSet::new(),
            already_notified: 0,
            lasttask: 0,
            allworkers,
            shutdown_remaining: 0,
            phase: Phase::HandingOut,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The dispatcher's `Last` value: either the minimum `last_task` over
    /// all timed-out workers, or the highest assigned `tasknum` if no
    /// timeout occurred before input exhaustion. Meaningful once
    /// [`Self::is_done`] is true.
    pub fn lasttask(&self) -> u64 {
        self.lasttask
    }

    /// Number of distinct `worker_id`s seen across every request handled so
    /// far. Used by tests to check against the number of `FINI` replies
    /// actually sent.
    pub fn known_worker_count(&self) -> usize {
        self.known_workers.len()
    }

    /// Handles one `TaskRequest` and produces the matching `TaskReply`.
    ///
    /// Must be called at most once per inbound request, in arrival order;
    /// callers (the gRPC service) must not call this concurrently, which a
    /// current-thread Tokio runtime guarantees for free.
    ///
    /// Rejects a request with an empty `worker_id`: every reply is keyed to
    /// a worker by that field, and an empty one could never be told apart
    /// from another empty one when counting distinct workers.
    pub fn handle_request(&mut self, req: &TaskRequest) -> Result<TaskReply, Error> {
        if req.worker_id.is_empty() {
            return Err(Error::MalformedRequest {
                reason: "worker_id must not be empty".to_string(),
            });
        }

        self.known_workers.insert(req.worker_id.clone());

        Ok(match self.phase {
            Phase::HandingOut => self.handle_handing_out(req),
            Phase::Draining => self.handle_draining(req),
            Phase::Done => {
                // A caller that keeps polling after Done gets a FINI, never
                // a crash; extras here are harmless no-ops.
                self.fini_reply()
            }
        })
    }

    fn handle_handing_out(&mut self, req: &TaskRequest) -> TaskReply {
        if req.maxtime >= 0.0 {
            if req.maxtime > self.maxtime {
                self.maxtime = req.maxtime;
                tracing::info!(worker = %req.worker_id, maxtime = self.maxtime, "Dispatcher:Maxtime");
            }

            self.tasknum += 1;
            let file = self.files[self.cursor].clone();
            self.cursor += 1;

            let reply = TaskReply {
                cmd: self.cmd.clone(),
                file,
                maxtime: self.maxtime,
                tasknum: self.tasknum,
            };

            if self.cursor == self.files.len() {
                // Input exhausted with no timeout ever seen.
                self.lasttask = self.tasknum;
                self.enter_draining();
            }

            reply
        } else {
            // First time-up signal: permanently switch to FINI-only replies.
            self.maxtime = TIME_UP;
            self.lasttask = req.last_task;
            tracing::info!(worker = %req.worker_id, "Dispatcher:Timeup");

            let reply = self.fini_reply();
            self.already_notified += 1;
            self.enter_draining();
            reply
        }
    }

    fn handle_draining(&mut self, req: &TaskRequest) -> TaskReply {
        if req.maxtime < 0.0 && req.last_task < self.lasttask {
            self.lasttask = req.last_task;
        }

        let reply = self.fini_reply();

        if self.shutdown_remaining > 0 {
            self.shutdown_remaining -= 1;
        }
        if self.shutdown_remaining == 0 {
            self.phase = Phase::Done;
            tracing::info!(last = self.lasttask, "Dispatcher:Last");
        }

        reply
    }

    /// Transitions `HandingOut -> Draining` (or directly to `Done` if no
    /// further `FINI` rounds are needed), computing `shutdown_remaining`
    /// from the externally supplied `allworkers` count.
    fn enter_draining(&mut self) {
        if self.phase == Phase::HandingOut {
            let shutdown = self.allworkers.saturating_sub(self.already_notified);
            tracing::info!(shutdown, "Dispatcher:Shutdown");
            self.shutdown_remaining = shutdown;
            self.phase = Phase::Draining;
            if self.shutdown_remaining == 0 {
                self.phase = Phase::Done;
                tracing::info!(last = self.lasttask, "Dispatcher:Last");
            }
        }
    }

    fn fini_reply(&self) -> TaskReply {
        TaskReply {
            cmd: FINI.to_string(),
            file: NONE_FILE.to_string(),
            maxtime: TIME_UP,
            tasknum: self.tasknum,
        }
    }
}
