//! Application error types

use std::time::Duration;

use flockloop_domain::{ApiResponse, DomainError, StatusCode};
use thiserror::Error;

/// Network-level failures reported by an [`HttpTransport`](crate::ports::HttpTransport).
///
/// A completed response with an error status is never a `TransportError`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The target URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced to callers of the API client.
///
/// `Clone` so that a single refresh failure can be delivered to every
/// request waiting on that refresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 401 that was not, or could not be, recovered by a token refresh.
    #[error("unauthorized{}", detail_suffix(.detail))]
    Unauthorized {
        /// Backend-provided reason.
        detail: Option<String>,
    },

    /// Any other non-success status.
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Status {
        /// Response status.
        status: StatusCode,
        /// Backend-provided reason.
        detail: Option<String>,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(#[from] TransportError),

    /// The refresh call did not settle within the configured timeout.
    #[error("token refresh timed out after {0:?}")]
    RefreshTimedOut(Duration),

    /// The refreshing request was dropped before the refresh settled.
    #[error("token refresh was interrupted before it completed")]
    RefreshInterrupted,

    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map_or_else(String::new, |detail| format!(": {detail}"))
}

impl ApiError {
    /// Classifies a non-success response.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        let detail = response.detail();
        if response.status.is_unauthorized() {
            Self::Unauthorized { detail }
        } else {
            Self::Status {
                status: response.status,
                detail,
            }
        }
    }

    /// Returns true for a 401 that reached the caller.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns the HTTP status behind this error, if there was a response.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message: the backend's `detail` when present,
    /// the error text otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Unauthorized {
                detail: Some(detail),
            }
            | Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            "Something went wrong".to_string()
        } else {
            message
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
