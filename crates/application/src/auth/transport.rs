//! Bearer-authenticated transport with single-flight refresh-and-retry.

use std::sync::Arc;
use std::time::Duration;

use flockloop_domain::{ApiRequest, ApiResponse, TokenPair, token_preview};
use tracing::{debug, info, warn};

use super::coordinator::{RefreshCoordinator, RefreshTicket};
use super::policy::RecoveryPolicy;
use crate::error::{ApiError, ApiResult};
use crate::ports::{HttpTransport, RefreshEndpoint, TokenStore};

/// Which send of a logical request is being made.
///
/// A request is sent at most twice: once as issued and once more after a
/// token refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The request as issued by the caller.
    First,
    /// The single resend after a refresh.
    Retry,
}

impl Attempt {
    /// Returns true if no further resend is allowed.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Retry)
    }
}

/// Wraps an [`HttpTransport`] with bearer attachment and 401 recovery.
///
/// Every request is sent with the store's current access token. A 401 on the
/// first attempt of a recoverable request triggers a token refresh shared by
/// every concurrently failing request, then one resend with the new token.
/// When the refresh fails, or cannot be attempted, the store is cleared.
pub struct AuthenticatedTransport {
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn TokenStore>,
    refresher: Arc<dyn RefreshEndpoint>,
    coordinator: Arc<RefreshCoordinator>,
    policy: RecoveryPolicy,
    refresh_timeout: Option<Duration>,
}

impl AuthenticatedTransport {
    /// Creates a transport with its own coordinator and the default policy.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
        refresher: Arc<dyn RefreshEndpoint>,
    ) -> Self {
        Self {
            transport,
            store,
            refresher,
            coordinator: Arc::new(RefreshCoordinator::new()),
            policy: RecoveryPolicy::default(),
            refresh_timeout: None,
        }
    }

    /// Shares `coordinator` with other transports over the same store.
    #[must_use]
    pub fn with_coordinator(mut self, coordinator: Arc<RefreshCoordinator>) -> Self {
        self.coordinator = coordinator;
        self
    }

    /// Replaces the recovery policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RecoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fails a refresh that has not settled after `timeout`.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// The token store requests are authorized from.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// The unauthenticated transport underneath.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// The refresh coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    /// Sends `request` with bearer authorization, recovering from one 401.
    ///
    /// # Errors
    ///
    /// - `ApiError::Unauthorized` for an unrecoverable 401, or a 401 on the resend
    /// - `ApiError::Status` for any other non-2xx status
    /// - the refresh error when the shared refresh failed
    /// - `ApiError::Transport` when no response was received
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        request.validate()?;

        let mut attempt = Attempt::First;
        let mut token = self.store.access_token();
        loop {
            let outgoing = token
                .as_deref()
                .map_or_else(|| request.clone(), |token| request.with_bearer(token));
            let response = self.transport.send(&outgoing).await?;
            debug!(
                method = %request.method,
                path = %request.path,
                status = response.status.as_u16(),
                ?attempt,
                "response received"
            );

            if response.status.is_success() {
                return Ok(response);
            }
            if !response.status.is_unauthorized() || attempt.is_final() {
                return Err(ApiError::from_response(&response));
            }

            token = Some(self.recover(request, &response).await?);
            attempt = Attempt::Retry;
        }
    }

    /// Sends `request` through the raw transport without authorization.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`send`](Self::send), with no recovery.
    pub async fn send_unauthenticated(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        request.validate()?;
        let response = self.transport.send(request).await?;
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    /// Obtains a fresh access token after a first-attempt 401, either by
    /// leading the refresh or by waiting on the one in flight.
    async fn recover(&self, request: &ApiRequest, response: &ApiResponse) -> ApiResult<String> {
        let original = ApiError::from_response(response);

        if !self.policy.is_recoverable(request) {
            info!(path = %request.path, "401 from an auth endpoint, signing out");
            self.store.clear();
            return Err(original);
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            info!(path = %request.path, "401 without a refresh token, signing out");
            self.store.clear();
            return Err(original);
        };

        match self.coordinator.begin(request.label()) {
            RefreshTicket::Wait(pending) => pending.wait().await,
            RefreshTicket::Lead(lease) => match self.refresh(&refresh_token).await {
                Ok(tokens) => {
                    let access_token = tokens.access_token.clone();
                    self.store.set_tokens(tokens);
                    let waiting = lease.resolve(&access_token);
                    info!(
                        token = %token_preview(&access_token),
                        waiting,
                        "access token refreshed"
                    );
                    Ok(access_token)
                }
                Err(error) => {
                    // Signed out before the coordinator is freed, so a late 401
                    // finds no refresh token to start another cycle with.
                    self.store.clear();
                    let waiting = lease.reject(&error);
                    warn!(%error, waiting, "token refresh failed, signing out");
                    Err(error)
                }
            },
        }
    }

    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let call = self.refresher.refresh(refresh_token);
        match self.refresh_timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .unwrap_or(Err(ApiError::RefreshTimedOut(timeout))),
            None => call.await,
        }
    }
}

impl std::fmt::Debug for AuthenticatedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedTransport")
            .field("coordinator", &self.coordinator)
            .field("policy", &self.policy)
            .field("refresh_timeout", &self.refresh_timeout)
            .finish_non_exhaustive()
    }
}
