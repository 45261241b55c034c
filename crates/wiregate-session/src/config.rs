//! Gate configuration.

use std::time::Duration;

/// Read-only configuration for the handshake gate.
///
/// The gate never mutates this; it is set once when the gate is built.
/// How the values get here (files, env, flags) is the embedding server's
/// concern.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// The path handshake requests must hit exactly, e.g. `/socket.io/1/`.
    /// Requests *outside* this prefix are rejected outright unless
    /// [`allow_custom_requests`](Self::allow_custom_requests) is set.
    pub handshake_path: String,

    /// Permit requests whose path lies outside the handshake prefix to
    /// pass through instead of being rejected. Off by default.
    pub allow_custom_requests: bool,

    /// Advertised keepalive interval in seconds. `0` disables heartbeats,
    /// rendering the heartbeat field of the handshake body empty. The
    /// gate only advertises this value — enforcement lives elsewhere.
    pub heartbeat_timeout_secs: u64,

    /// How long (in seconds) a session may stay authorized without an
    /// actual connection before it is reclaimed.
    pub close_timeout_secs: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            handshake_path: "/socket.io/1/".to_string(),
            allow_custom_requests: false,
            heartbeat_timeout_secs: 60,
            close_timeout_secs: 25,
        }
    }
}

impl GateConfig {
    /// The close timeout as a [`Duration`], for arming the expiry timer.
    pub fn close_timeout(&self) -> Duration {
        Duration::from_secs(self.close_timeout_secs)
    }

    /// Whether heartbeats are advertised at all.
    pub fn heartbeat_enabled(&self) -> bool {
        self.heartbeat_timeout_secs != 0
    }
}
