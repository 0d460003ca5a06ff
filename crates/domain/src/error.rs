//! Domain error types

use thiserror::Error;

/// Errors raised while building a request or reading a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request path is empty or malformed.
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// A header name or value cannot be sent.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A body could not be encoded, decoded, or is not allowed.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
