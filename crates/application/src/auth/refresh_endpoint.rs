//! Refresh endpoint backed by the raw HTTP transport.

use std::sync::Arc;

use async_trait::async_trait;
use flockloop_domain::{ApiRequest, RefreshRequest, TokenPair, TokenResponse};

use super::policy::REFRESH_PATH;
use crate::error::{ApiError, ApiResult};
use crate::ports::{HttpTransport, RefreshEndpoint};

/// Calls `POST /auth/refresh` directly on the unauthenticated transport.
///
/// Going through the raw transport keeps a failing refresh from being
/// intercepted and refreshed again.
#[derive(Debug)]
pub struct HttpRefreshEndpoint<T: HttpTransport + ?Sized> {
    transport: Arc<T>,
}

impl<T: HttpTransport + ?Sized> HttpRefreshEndpoint<T> {
    /// Creates an endpoint over `transport`.
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: HttpTransport + ?Sized> RefreshEndpoint for HttpRefreshEndpoint<T> {
    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let request = ApiRequest::post(REFRESH_PATH).with_json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let response = self.transport.send(&request).await?;
        if !response.status.is_success() {
            return Err(ApiError::from_response(&response));
        }
        let tokens: TokenResponse = response
            .decode()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(tokens.into())
    }
}
