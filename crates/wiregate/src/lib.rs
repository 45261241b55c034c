//! # Wiregate
//!
//! The connection-handshake and session-lifecycle gate for a realtime
//! bidirectional messaging protocol layered over HTTP upgrade/polling
//! transports.
//!
//! Wiregate turns an anonymous inbound HTTP request into a provisionally
//! trusted, uniquely identified session, and later promotes that session
//! into a fully connected client — or reclaims it if the client never
//! follows through:
//!
//! ```text
//! inbound request ──→ AuthorizeGate::handle_request
//!                         │ mints SessionId, arms close-timeout,
//!                         │ replies "<sid>:<hb>:<close>:<transports>"
//!                         ▼
//!                  [client connects with the minted id]
//!                         │
//!                         ▼
//!                 AuthorizeGate::promote ──→ ConnectListener::on_connect
//!                         │ (expiry cancelled, exactly once)
//!                         ⋮
//!                 AuthorizeGate::on_disconnect
//!
//!            ── or, if the client never connects ──
//!                 close-timeout fires → session reclaimed
//! ```
//!
//! The transport stack itself (sockets, framing, upgrades) is not part of
//! this crate; it plugs in through the [`RequestChannel`] and
//! [`SessionChannel`] seams.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wiregate::prelude::*;
//!
//! # struct MyApp;
//! # impl<S: SessionChannel> ConnectListener<S> for MyApp {
//! #     async fn on_connect(&self, _session: &S) {}
//! # }
//! # async fn demo() {
//! let registry = Arc::new(SessionRegistry::new());
//! let gate = AuthorizeGate::new(GateConfig::default(), registry, MyApp);
//! // hand `gate` to your transport's request dispatch
//! # }
//! ```

#![allow(async_fn_in_trait)]

mod channel;
mod error;
mod gate;

pub use channel::RequestChannel;
pub use error::WiregateError;
pub use gate::{AuthorizeGate, Disposition};

/// One-stop imports for embedding the gate in a server.
pub mod prelude {
    pub use crate::{AuthorizeGate, Disposition, RequestChannel, WiregateError};
    pub use wiregate_protocol::{
        HandshakeReply, InboundRequest, Method, Packet, PacketKind,
        SessionId, Transport,
    };
    pub use wiregate_session::{
        ConnectListener, GateConfig, SessionChannel, SessionError,
        SessionRegistry,
    };
    pub use wiregate_timer::KeyedScheduler;
}
