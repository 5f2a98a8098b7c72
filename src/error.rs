//! Error types surfaced by the server facade.
//!
//! Every failure except [`ServerError::ListenFailure`] is returned to the
//! caller of the failing operation. A listen failure happens on the detached
//! listener task, where nobody can observe a returned error, so it is logged
//! and the process exits.

use crate::config::ConfigError;
use crate::routing::Group;

/// Errors produced by configuration, registration and lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A configuration option rejected the draft; construction was aborted.
    #[error("configuration option failed: {0}")]
    ConfigMutationFailed(#[from] ConfigError),

    /// Registration targeted a namespace the engine cannot mount.
    #[error("engine type not supported: cannot mount group `{group}`")]
    UnsupportedEngineType { group: Group },

    /// A route path that the router would refuse.
    #[error("invalid route path `{path}`: {reason}")]
    InvalidRoutePath { path: String, reason: &'static str },

    /// The shutdown deadline elapsed before in-flight requests finished.
    #[error("shutdown deadline elapsed before in-flight requests completed")]
    ShutdownTimeout,

    /// `start` was called on a server that already left the created state.
    #[error("server has already been started or closed")]
    AlreadyStarted,

    /// `start` was called outside a Tokio runtime.
    #[error("no Tokio runtime to run the listener on: {0}")]
    RuntimeUnavailable(#[from] tokio::runtime::TryCurrentError),

    /// The listener could not bind or stopped with an I/O error.
    #[error("failed to listen on `{address}`: {source}")]
    ListenFailure {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ServerError>;
