//! Error types for the protocol layer.

/// Errors that can occur while interpreting boundary values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The request target wasn't origin-form (`/path?query`).
    /// The transport should have normalized this before handing it over.
    #[error("invalid request target: {0:?}")]
    InvalidUri(String),
}
