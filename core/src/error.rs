//! Error types for the remote action core.
//!
//! # Design
//! Three failure classes, one per stage of a remote action: building the
//! outbound request, moving bytes over the network, and decoding the reply.
//! A backend that answers with a well-formed rejection is not an error; it
//! is an `ActionOutcome` whose result code says so.

use thiserror::Error;

/// Errors produced while building, executing, or decoding a remote action.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The outbound request could not be assembled (bad URL, header value
    /// that is not representable on the wire).
    #[error("request construction failed: {0}")]
    RequestConstruction(String),

    /// The backend could not be reached, or the reply could not be read.
    /// Produced by the host that executes the request, never by the core.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The reply body is not a decodable remote action record.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short machine-readable name, used in logs and RPC error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::RequestConstruction(_) => "request_construction",
            ApiError::Transport(_) => "transport",
            ApiError::Decode(_) => "decode",
        }
    }
}
