use flockloop_domain::{
    ApiRequest, LoginRequest, MessageResponse, RefreshRequest, RegisterRequest,
    ResendConfirmationRequest, TokenResponse, UserRead,
};

use super::ApiClient;
use crate::auth::{LOGIN_PATH, REFRESH_PATH};
use crate::error::ApiResult;

/// `/auth` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token pair. Does not touch the store.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` on bad credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<TokenResponse> {
        let request = ApiRequest::post(LOGIN_PATH).with_json(credentials)?;
        self.client.fetch(&request).await
    }

    /// Exchanges a refresh token for a new pair. Does not touch the store.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenResponse> {
        let request = ApiRequest::post(REFRESH_PATH).with_json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        self.client.fetch(&request).await
    }

    /// Invalidates the session server-side.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn logout(&self) -> ApiResult<MessageResponse> {
        self.client.fetch(&ApiRequest::post("/auth/logout")).await
    }

    /// Creates a content creator account.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn register(&self, account: &RegisterRequest) -> ApiResult<MessageResponse> {
        let request = ApiRequest::post("/auth/register").with_json(account)?;
        self.client.fetch(&request).await
    }

    /// Confirms an email address with the token from the confirmation mail.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn confirm_email(&self, token: &str) -> ApiResult<MessageResponse> {
        let request = ApiRequest::get("/auth/confirm").with_query("token", token);
        self.client.fetch(&request).await
    }

    /// Sends the confirmation mail again.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn resend_confirmation(
        &self,
        body: &ResendConfirmationRequest,
    ) -> ApiResult<MessageResponse> {
        let request = ApiRequest::post("/auth/resend-confirmation").with_json(body)?;
        self.client.fetch(&request).await
    }

    /// Fetches the authenticated user.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn me(&self) -> ApiResult<UserRead> {
        self.client.fetch(&ApiRequest::get("/auth/me")).await
    }
}
