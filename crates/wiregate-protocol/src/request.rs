//! The inbound-request view the gate inspects.
//!
//! The gate doesn't parse HTTP — the transport already did that. What it
//! needs is a narrow, owned snapshot of the request: method, path, query
//! parameters, and the `Origin` header. [`InboundRequest::from_uri`] is a
//! convenience for transports that hand over a raw request-target string.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// The HTTP method of an inbound request.
///
/// The gate only distinguishes *read* methods (idempotent, query-only)
/// from everything else: a handshake attempt must be a read on the exact
/// handshake path. Anything else passes through to the next stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    /// Any method not modeled above (PATCH, OPTIONS, extensions).
    Other,
}

impl Method {
    /// Whether this is a read method eligible to start a handshake.
    pub fn is_read(&self) -> bool {
        matches!(self, Method::Get | Method::Head)
    }
}

// ---------------------------------------------------------------------------
// InboundRequest
// ---------------------------------------------------------------------------

/// An inbound HTTP request, as seen by the gate.
///
/// `params` is multi-value: a key repeated in the query string keeps every
/// value, in order. The gate's echo-token rule ("first value wins") is
/// expressed via [`first_param`](Self::first_param).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    /// The HTTP method.
    pub method: Method,

    /// The request path, without the query string.
    pub path: String,

    /// Decoded query parameters, in query-string order per key.
    pub params: HashMap<String, Vec<String>>,

    /// The `Origin` header, if the client sent one.
    pub origin: Option<String>,
}

impl InboundRequest {
    /// Builds a request from a raw request-target like
    /// `/socket.io/1/?jsonp=3&t=171`.
    ///
    /// Splits the path from the query string and collects `k=v` pairs;
    /// a bare key without `=` gets an empty value. Percent-decoding is
    /// the transport's job and is assumed to have happened already.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidUri`] if the target is empty or
    /// is not origin-form (doesn't start with `/`).
    pub fn from_uri(
        method: Method,
        uri: &str,
        origin: Option<String>,
    ) -> Result<Self, ProtocolError> {
        if uri.is_empty() || !uri.starts_with('/') {
            return Err(ProtocolError::InvalidUri(uri.to_string()));
        }

        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };

        let mut params: HashMap<String, Vec<String>> = HashMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            params
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
        }

        Ok(Self {
            method,
            path: path.to_string(),
            params,
            origin,
        })
    }

    /// The first value of the named query parameter, if present.
    pub fn first_param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

// =========================================================================
// Tests
// =========================================================================
