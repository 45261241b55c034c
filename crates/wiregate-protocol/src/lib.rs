//! Boundary types for Wiregate.
//!
//! This crate defines everything that crosses the line between the
//! handshake gate and the transport layer that hosts it:
//!
//! - **Identity** ([`SessionId`]) — the 128-bit value that names a session.
//! - **Requests** ([`InboundRequest`], [`Method`]) — the narrow view of an
//!   inbound HTTP request the gate needs to make its decision.
//! - **Replies** ([`HandshakeReply`]) — the handshake payload handed back
//!   to the transport for delivery, including the echo parameters needed
//!   for cross-origin framing.
//! - **Packets** ([`Packet`]) — protocol-level packets the gate emits once
//!   a session is promoted.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about registries, timers, or listeners.
//! It only defines the shapes that travel across the gate's seams:
//!
//! ```text
//! Transport (HTTP/WebSocket/polling) → InboundRequest → Gate
//! Gate → HandshakeReply / Packet → Transport
//! ```

mod error;
mod handshake;
mod request;
mod types;

pub use error::ProtocolError;
pub use handshake::HandshakeReply;
pub use request::{InboundRequest, Method};
pub use types::{Packet, PacketKind, SessionId, Transport};
