//! Error types shared by the dispatcher and worker binaries.
//!
//! Mirrors the shape of a typical gRPC-service error enum: one variant per
//! recoverable/reportable case, plus a `From<Error> for tonic::Status` impl
//! so errors cross the RPC boundary with an appropriate status code.
//!
//! Configuration errors (bad duration strings, missing input files, `start`
//! out of range, empty input, non-positive worker counts) are deliberately
//! *not* represented here: they are reported via `anyhow::Error` at the
//! binary boundary before any socket is opened, and never reach a peer.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the dispatcher/worker RPC boundary.
#[derive(Clone, thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A worker request arrived with a field that violates the protocol
    /// (e.g. an empty `worker_id`).
    #[error("malformed task request: {reason}")]
    MalformedRequest { reason: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::MalformedRequest { reason } => Self::invalid_argument(reason),
        }
    }
}
