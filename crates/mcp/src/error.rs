//! MCP error types.

use crate::protocol::ResponseError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced an HTTP response (connect, DNS, TLS, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no session ID in initialize response")]
    MissingSessionId,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The response carried an `error` member, in whatever shape it was sent.
    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] ResponseError),

    #[error("failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or HTTP-level failure.
    Transport,
    /// The server answered, but not with what the protocol expects.
    Protocol,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Status { .. } => ErrorKind::Transport,
            Self::MissingSessionId
            | Self::InvalidResponse(_)
            | Self::JsonRpc(_)
            | Self::Serialize(_) => ErrorKind::Protocol,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
