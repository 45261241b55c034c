//! The reply surface of an inbound request.

use wiregate_protocol::HandshakeReply;

/// What the gate can do with the connection an inbound request arrived on.
///
/// Implemented by the transport layer. The gate resolves every request it
/// handles into exactly one of these calls; requests it does not handle
/// pass through untouched (see
/// [`Disposition`](crate::Disposition)).
pub trait RequestChannel: Send + Sync {
    /// The transport's error type for replying.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Delivers a successful handshake reply. The transport is
    /// responsible for framing — plain body, JSONP wrapping via
    /// `reply.jsonp`, CORS headers via `reply.origin`.
    async fn send_handshake(
        &self,
        reply: HandshakeReply,
    ) -> Result<(), Self::Error>;

    /// Answers with a client-error status and closes the connection.
    /// Terminal: nothing else is sent on this channel afterwards.
    async fn reject(&self, status: u16) -> Result<(), Self::Error>;
}
