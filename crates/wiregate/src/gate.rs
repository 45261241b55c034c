//! The authorize gate: gatekeeping, promotion, and disconnect reaction.
//!
//! One `AuthorizeGate` instance guards one server. Every inbound HTTP
//! request flows through [`handle_request`](AuthorizeGate::handle_request);
//! every established transport connection is announced via
//! [`promote`](AuthorizeGate::promote); every closed one via
//! [`on_disconnect`](AuthorizeGate::on_disconnect).
//!
//! # Session lifecycle
//!
//! ```text
//! handle_request ──→ pending ──(promote)──→ connected ──(on_disconnect)──→ ended
//!                       │
//!                       └──(close-timeout fires)──→ expired
//! ```
//!
//! No transition runs backwards, and the pending→{connected, expired} fork
//! resolves exactly once: promotion cancels the expiry timer, and the
//! timer's generation check makes a concurrent cancel-vs-fire race come
//! out one way or the other, never both.

use std::sync::Arc;

use tracing::{debug, warn};
use wiregate_protocol::{
    HandshakeReply, InboundRequest, Packet, SessionId,
};
use wiregate_session::{
    ConnectListener, GateConfig, SessionChannel, SessionError,
    SessionRegistry,
};
use wiregate_timer::KeyedScheduler;

use crate::{RequestChannel, WiregateError};

/// The HTTP status sent to requests outside the handshake prefix.
const REJECT_STATUS: u16 = 400;

// ---------------------------------------------------------------------------
// Disposition
// ---------------------------------------------------------------------------

/// What the gate did with an inbound request.
#[derive(Debug)]
pub enum Disposition {
    /// The gate answered the request itself (handshake reply or
    /// rejection). The transport is done with it.
    Handled,

    /// Not the gate's business — the untouched request, to be forwarded
    /// to the next stage of the server's pipeline.
    PassThrough(InboundRequest),
}

// ---------------------------------------------------------------------------
// AuthorizeGate
// ---------------------------------------------------------------------------

/// The handshake authorization and session-expiry gate.
///
/// Owns the expiry scheduler and a handle to the injected
/// [`SessionRegistry`]; shares the registry with whatever else needs
/// membership answers (e.g. the transport's message-routing checks).
///
/// Construction spawns the *expiry sweeper*: a task that drains the
/// scheduler's expiry channel and removes timed-out ids from the
/// registry. The sweeper ends on its own when the gate is dropped.
pub struct AuthorizeGate<L> {
    config: GateConfig,
    registry: Arc<SessionRegistry>,
    scheduler: KeyedScheduler<SessionId>,
    listener: L,
}

impl<L> AuthorizeGate<L> {
    /// Builds a gate around an injected registry and connect listener.
    ///
    /// Must be called from within a Tokio runtime: the expiry sweeper is
    /// spawned here.
    pub fn new(
        config: GateConfig,
        registry: Arc<SessionRegistry>,
        listener: L,
    ) -> Self {
        let (scheduler, mut expired) = KeyedScheduler::new();

        // The expiry sweeper: sole consumer of fired timers. Exits when
        // the scheduler (and with it the channel) goes away.
        let sweeper_registry = Arc::clone(&registry);
        tokio::spawn(async move {
            while let Some(session_id) = expired.recv().await {
                sweeper_registry.remove(&session_id);
                debug!(
                    %session_id,
                    "authorized session removed due to connect timeout"
                );
            }
        });

        Self {
            config,
            registry,
            scheduler,
            listener,
        }
    }

    /// The gate's configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether `session_id` is currently authorized.
    pub fn is_authorized(&self, session_id: &SessionId) -> bool {
        self.registry.contains(session_id)
    }

    /// Inspects an inbound request and resolves it.
    ///
    /// Three outcomes:
    /// - path outside the handshake prefix with custom requests disabled
    ///   → reject with a client-error status, connection closes;
    /// - read method on *exactly* the handshake path → handshake: mint an
    ///   id, register it, arm its close-timeout, reply;
    /// - anything else → [`Disposition::PassThrough`], untouched.
    ///
    /// The method/path pair is checked jointly: a POST to the handshake
    /// path is not a handshake attempt, it passes through.
    ///
    /// # Errors
    /// Only transport failures while replying surface as errors;
    /// ineligible requests are resolved locally and are not errors.
    pub async fn handle_request<R: RequestChannel>(
        &self,
        request: InboundRequest,
        channel: &R,
    ) -> Result<Disposition, WiregateError> {
        if !self.config.allow_custom_requests
            && !request.path.starts_with(&self.config.handshake_path)
        {
            channel
                .reject(REJECT_STATUS)
                .await
                .map_err(WiregateError::transport)?;
            return Ok(Disposition::Handled);
        }

        if request.method.is_read()
            && request.path == self.config.handshake_path
        {
            self.authorize(&request, channel).await?;
            return Ok(Disposition::Handled);
        }

        Ok(Disposition::PassThrough(request))
    }

    /// Authorizes a handshake attempt: mint, register, arm, reply.
    async fn authorize<R: RequestChannel>(
        &self,
        request: &InboundRequest,
        channel: &R,
    ) -> Result<(), WiregateError> {
        let session_id = SessionId::mint();

        // Insert-then-arm with no await between: by the time any other
        // task can observe this id, it is both registered and expirable.
        self.registry.add(session_id);
        self.scheduler
            .schedule(session_id, self.config.close_timeout());

        let reply = HandshakeReply::build(
            session_id,
            self.config.heartbeat_timeout_secs,
            self.config.close_timeout_secs,
            request.first_param("jsonp").map(str::to_string),
            request.origin.clone(),
        );

        channel
            .send_handshake(reply)
            .await
            .map_err(WiregateError::transport)?;

        debug!(%session_id, "new session authorized");
        Ok(())
    }

    /// Promotes a session to connected once its transport connection is
    /// established.
    ///
    /// Cancels the pending expiry (idempotent — a timer that already
    /// fired or never existed is fine), sends the connection-established
    /// packet, and invokes the connect listener exactly once.
    ///
    /// # Errors
    /// Returns [`SessionError::NotAuthorized`] if the id is not in the
    /// registry — expired, already disconnected, or never minted. The
    /// promotion is refused outright: no packet, no listener call.
    pub async fn promote<S>(
        &self,
        session: &S,
    ) -> Result<(), WiregateError>
    where
        S: SessionChannel,
        L: ConnectListener<S>,
    {
        let session_id = session.session_id();

        if !self.registry.contains(&session_id) {
            // Transports normally stop reconnect attempts well before the
            // close timeout, so reaching this is a protocol anomaly worth
            // surfacing — but never a crash.
            warn!(
                %session_id,
                "promotion refused: session not authorized"
            );
            return Err(SessionError::NotAuthorized(session_id).into());
        }

        self.scheduler.cancel(&session_id);

        session
            .send_packet(Packet::connect())
            .await
            .map_err(WiregateError::transport)?;
        self.listener.on_connect(session).await;

        debug!(%session_id, "session promoted to connected");
        Ok(())
    }

    /// Reacts to the termination of a connected session's transport, for
    /// any reason — client close, network failure, server shutdown.
    ///
    /// Unconditionally removes the id from the registry. Idempotent:
    /// calling it for an id that is already gone does nothing.
    pub fn on_disconnect(&self, session_id: &SessionId) {
        if self.registry.remove(session_id) {
            debug!(%session_id, "session removed on disconnect");
        }
    }
}
