//! Session tracking for Wiregate.
//!
//! This crate owns the state the handshake gate decides with:
//!
//! 1. **Registry** ([`SessionRegistry`]) — the concurrent set of session
//!    ids that are currently authorized.
//! 2. **Configuration** ([`GateConfig`]) — handshake path, bypass flag,
//!    and the advertised timeouts.
//! 3. **Seams** ([`SessionChannel`], [`ConnectListener`]) — the outbound
//!    surface of a connected session, and the application callback fired
//!    when a session is promoted.
//!
//! # How it fits in the stack
//!
//! ```text
//! Gate (above)      ← authorizes ids, promotes sessions, reacts to closes
//!     ↕
//! Session (this crate)  ← who is currently allowed to connect
//!     ↕
//! Protocol (below)  ← SessionId, Packet types
//! ```

#![allow(async_fn_in_trait)]

mod config;
mod error;
mod listener;
mod registry;

pub use config::GateConfig;
pub use error::SessionError;
pub use listener::{ConnectListener, SessionChannel};
pub use registry::SessionRegistry;
