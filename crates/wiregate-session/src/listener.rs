//! The seams between the gate and its collaborators.
//!
//! Wiregate doesn't ship a transport or an application layer. It defines
//! two narrow traits instead: [`SessionChannel`], implemented by the
//! transport for each established connection, and [`ConnectListener`],
//! implemented by the application to hear about promoted sessions. The
//! gate drives both and knows nothing beyond them.

use wiregate_protocol::{Packet, SessionId};

/// The outbound surface of an established transport connection,
/// addressed by the session it belongs to.
///
/// # Trait bounds
///
/// `Send + Sync` because the gate may touch a channel from any Tokio
/// worker thread. Errors are the transport's own type; the gate only
/// forwards them.
pub trait SessionChannel: Send + Sync {
    /// The transport's error type for outbound sends.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The session this connection was established for.
    fn session_id(&self) -> SessionId;

    /// Frames and delivers a protocol packet to the client.
    async fn send_packet(&self, packet: Packet) -> Result<(), Self::Error>;
}

/// Application callback for newly connected sessions.
///
/// Invoked by the gate exactly once per promoted session, with the live
/// session handle. This is a single-method capability — implement it on
/// whatever owns your application state:
///
/// ```ignore
/// struct GameWorld;
///
/// impl<S: SessionChannel> ConnectListener<S> for GameWorld {
///     async fn on_connect(&self, session: &S) {
///         tracing::info!(session_id = %session.session_id(), "player joined");
///     }
/// }
/// ```
pub trait ConnectListener<S: SessionChannel>: Send + Sync + 'static {
    /// Called after a session has been promoted to connected and the
    /// connection-established packet has been sent.
    async fn on_connect(&self, session: &S);
}
