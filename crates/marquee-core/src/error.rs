//! Shared error type across Marquee crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Unsupported config or protocol version.
    UnsupportedVersion,
    /// Comment body is empty.
    ContentEmpty,
    /// Comment body exceeds the size limit.
    ContentTooLong,
    /// A collaborator (social graph, store) could not answer.
    Unavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::ContentEmpty => "CONTENT_EMPTY",
            ClientCode::ContentTooLong => "CONTENT_TOO_LONG",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MarqueeError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("empty or invalid content")]
    ContentEmpty,
    #[error("content too long (max {max} bytes)")]
    ContentTooLong { max: usize },
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MarqueeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MarqueeError::BadRequest(_) => ClientCode::BadRequest,
            MarqueeError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MarqueeError::ContentEmpty => ClientCode::ContentEmpty,
            MarqueeError::ContentTooLong { .. } => ClientCode::ContentTooLong,
            MarqueeError::Unavailable(_) => ClientCode::Unavailable,
            MarqueeError::Internal(_) => ClientCode::Internal,
        }
    }
}
