//! Refresh endpoint port

use async_trait::async_trait;
use flockloop_domain::TokenPair;

use crate::error::ApiResult;

/// Remote operation exchanging a refresh token for a new token pair.
#[async_trait]
pub trait RefreshEndpoint: Send + Sync {
    /// Exchanges `refresh_token` for a fresh pair.
    ///
    /// # Errors
    ///
    /// Any `ApiError`; the caller treats every error as a failed refresh.
    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair>;
}
