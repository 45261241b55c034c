//! Core identity and packet types.
//!
//! A session is the server's unit of trust: it is minted during the
//! handshake, tracked while the client is authorized, and addressed by
//! [`SessionId`] everywhere — registry, scheduler, and wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// A unique identifier for a session.
///
/// This is a newtype wrapper over a version-4 UUID: 128 bits of fresh
/// randomness per handshake, opaque to the transport, immutable once minted.
///
/// The same value keys both the session registry ("is this id authorized?")
/// and the expiry scheduler ("cancel the timer for this id"). That dual use
/// is deliberate — promotion cancels the timer with exactly the key the
/// handshake armed it under.
///
/// `#[serde(transparent)]` serializes the id as the bare UUID string, not
/// as a wrapper object, which is what clients expect in the handshake body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mints a fresh random session id.
    ///
    /// Every handshake gets a new one; ids are single-use and never
    /// recycled, so collisions across the lifetime of a server are
    /// vanishingly unlikely (2^122 random bits).
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID. Mainly useful in tests and when a
    /// transport needs to reconstruct an id from the wire.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Renders the canonical hyphenated form, e.g.
/// `3fa85f64-5717-4562-b3fc-2c963f66afa6` — the exact text that appears
/// as the first field of the handshake body.
impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Transport capabilities
// ---------------------------------------------------------------------------

/// A transport the server can speak.
///
/// The handshake advertises the server's capabilities as an ordered list;
/// clients pick the first one they support. Order matters and is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    /// Long-polling over plain XHR. Listed first because every client
    /// can speak it.
    XhrPolling,

    /// A persistent WebSocket connection.
    WebSocket,
}

impl Transport {
    /// The server's fixed, ordered capability list. This exact sequence
    /// appears in every handshake reply.
    pub const SUPPORTED: &'static [Transport] =
        &[Transport::XhrPolling, Transport::WebSocket];

    /// The wire name of this transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::XhrPolling => "xhr-polling",
            Transport::WebSocket => "websocket",
        }
    }

    /// Renders [`Self::SUPPORTED`] as the comma-separated list used in
    /// the handshake body, e.g. `"xhr-polling,websocket"`.
    pub fn supported_list() -> String {
        let names: Vec<&str> =
            Self::SUPPORTED.iter().map(Transport::as_str).collect();
        names.join(",")
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Packets
// ---------------------------------------------------------------------------

/// The kind of a protocol packet.
///
/// Only the lifecycle kinds the gate itself emits are modeled here; the
/// full messaging grammar (events, acks, json payloads) lives with the
/// wider protocol stack, not in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketKind {
    /// The session has been promoted to connected.
    Connect,
    /// The session is being torn down.
    Disconnect,
    /// Something went wrong at the protocol level.
    Error,
}

/// A protocol packet, as handed to the transport for framing.
///
/// The gate never serializes packets itself — encoding is the transport's
/// concern. It only produces typed values like `Packet::connect()` when a
/// session transitions state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// What kind of packet this is.
    pub kind: PacketKind,
}

impl Packet {
    /// The connection-established packet, sent to a client exactly once
    /// when its session is promoted.
    pub fn connect() -> Self {
        Self {
            kind: PacketKind::Connect,
        }
    }

    /// The teardown packet.
    pub fn disconnect() -> Self {
        Self {
            kind: PacketKind::Disconnect,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
