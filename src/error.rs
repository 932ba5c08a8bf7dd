//! Crate-wide error handling.
//!
//! Subsystems keep their own typed errors ([`HostError`] for host-operation
//! failures, [`SessionError`] for the session executor); this module folds
//! them into one `Error` for callers that cross both boundaries.

use crate::host::HostError;
use crate::session::SessionError;
use thiserror::Error;

/// Top-level error for sceneflow operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The wrapped host operation failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The session executor rejected or lost the request.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// A stream broke its port contract (e.g. data after end-of-stream).
    /// Fatal to the affected component's current operation only.
    #[error("protocol violation: {0}")]
    Protocol(String),
}

/// Result type alias for sceneflow operations.
pub type Result<T> = std::result::Result<T, Error>;
