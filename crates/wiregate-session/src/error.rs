//! Error types for the session layer.

use wiregate_protocol::SessionId;

/// Errors that can occur around session lifecycle transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A promotion was attempted for a session id that is not in the
    /// registry — it expired, was disconnected, or was never authorized.
    /// Surfaced as an anomaly rather than acted on: the gate refuses the
    /// promotion instead of fabricating a session.
    #[error("session {0} is not authorized")]
    NotAuthorized(SessionId),
}
