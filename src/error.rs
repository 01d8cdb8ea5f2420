//! Process-level errors.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors that stop the server before or while it serves.
///
/// Any of these terminates the process; there is no retry.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The task store could not be reached.
    #[error("failed to connect to task store at {target}: {source}")]
    StoreUnreachable {
        /// Human-readable store target.
        target: String,
        /// The underlying connection error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured backend was not compiled into this binary.
    #[error("store backend `{0}` is not available; rebuild with the `{0}` feature")]
    BackendUnavailable(&'static str),

    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: SocketAddr,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
