//! Unified error type for the gate.

use wiregate_protocol::ProtocolError;
use wiregate_session::SessionError;

/// Top-level error for embedders of the gate.
///
/// Session and protocol errors convert via `?` thanks to the `#[from]`
/// impls. Transport errors are whatever the embedding transport's channel
/// types produce, so they arrive boxed.
#[derive(Debug, thiserror::Error)]
pub enum WiregateError {
    /// The transport failed to deliver a reply or packet.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A session-lifecycle rule was violated (e.g. promoting an
    /// unauthorized id).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A boundary value could not be interpreted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl WiregateError {
    /// Wraps a transport-specific error.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
