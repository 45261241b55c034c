//! The handshake reply payload.
//!
//! A successful handshake answers with a single line of text:
//!
//! ```text
//! <sessionId>:<heartbeatTimeoutOrEmpty>:<closeTimeoutSeconds>:<transports>
//! ```
//!
//! e.g. `3fa85f64-5717-4562-b3fc-2c963f66afa6:60:25:xhr-polling,websocket`.
//! When heartbeats are disabled the second field is empty (the two colons
//! stay): `3fa85f64-…-afa6::25:xhr-polling,websocket`.

use serde::{Deserialize, Serialize};

use crate::{SessionId, Transport};

/// The payload returned to a client after a successful handshake.
///
/// The transport layer delivers this verbatim. `jsonp` and `origin` are
/// echo parameters: they pass through unchanged from the request so the
/// transport can frame the body for cross-origin or script-tag delivery
/// (JSONP callback wrapping, CORS headers). The gate never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeReply {
    /// The freshly minted session id, also embedded in `body`.
    pub session_id: SessionId,

    /// The textual handshake line described in the module docs.
    pub body: String,

    /// The client-supplied `jsonp` callback token, if any. First value
    /// wins when the query string carries several.
    pub jsonp: Option<String>,

    /// The request's `Origin` header, if any.
    pub origin: Option<String>,
}

impl HandshakeReply {
    /// Builds the reply for a newly authorized session.
    ///
    /// `heartbeat_timeout_secs == 0` means heartbeats are disabled and the
    /// heartbeat field is rendered empty. The close timeout is always
    /// numeric, and the transport list is the server's fixed capability
    /// order from [`Transport::SUPPORTED`].
    pub fn build(
        session_id: SessionId,
        heartbeat_timeout_secs: u64,
        close_timeout_secs: u64,
        jsonp: Option<String>,
        origin: Option<String>,
    ) -> Self {
        let heartbeat = if heartbeat_timeout_secs == 0 {
            String::new()
        } else {
            heartbeat_timeout_secs.to_string()
        };

        let body = format!(
            "{session_id}:{heartbeat}:{close_timeout_secs}:{transports}",
            transports = Transport::supported_list(),
        );

        Self {
            session_id,
            body,
            jsonp,
            origin,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
