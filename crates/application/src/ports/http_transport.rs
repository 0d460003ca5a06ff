//! HTTP transport port

use async_trait::async_trait;
use flockloop_domain::{ApiRequest, ApiResponse};

use crate::error::TransportError;

/// Port for sending a single HTTP request.
///
/// Implementations resolve relative paths against their base URL and
/// return every completed response as `Ok`, whatever its status. Only
/// failures that produced no response are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` exactly once.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no response was received.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}
