//! gRPC service wiring around [`Dispatcher`].
//!
//! A thin `tonic` service impl that delegates to the owned state machine
//! and notifies a shutdown watcher once the run is [`Dispatcher::is_done`].

use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tonic::{Request, Response, Status};

use taskfarm_core::proto::{TaskReply, TaskRequest, dispatch_server::Dispatch};

use crate::state::Dispatcher;

/// Implements the `Dispatch` gRPC service on top of a shared [`Dispatcher`].
///
/// The dispatcher runs on a current-thread Tokio runtime (see
/// `main.rs`), so in practice only one `request_task` call is ever
/// in flight at a time; the `Mutex` exists to satisfy `Send + Sync` for
/// `tonic`, not to arbitrate real contention.
#[derive(Clone)]
pub struct DispatchService {
    dispatcher: Arc<Mutex<Dispatcher>>,
    done: Arc<Notify>,
}

impl DispatchService {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            done: Arc::new(Notify::new()),
        }
    }

    /// Resolves once the dispatcher has serviced its final `FINI` round and
    /// reached [`crate::state::Phase::Done`]. `main.rs` awaits this to know
    /// when to stop the server.
    pub fn done_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.done)
    }
}

#[tonic::async_trait]
impl Dispatch for DispatchService {
    async fn request_task(
        &self,
        request: Request<TaskRequest>,
    ) -> Result<Response<TaskReply>, Status> {
        let req = request.into_inner();
        let mut dispatcher = self.dispatcher.lock().await;
        let reply = dispatcher.handle_request(&req)?;

        if dispatcher.is_done() {
            self.done.notify_waiters();
        }

        Ok(Response::new(reply))
    }
}
