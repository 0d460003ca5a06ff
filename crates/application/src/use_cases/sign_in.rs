//! Sign-in use case.

use std::sync::Arc;

use flockloop_domain::{LoginRequest, Session, TokenPair, UserRead};
use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Input for signing in.
#[derive(Debug, Clone)]
pub struct SignInInput {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Output from signing in.
#[derive(Debug, Clone)]
pub struct SignInOutput {
    /// The signed-in user.
    pub user: UserRead,
}

/// Use case for establishing a session.
///
/// Tokens are stored before the profile is fetched so that `/auth/me` is
/// sent with the new bearer token.
pub struct SignIn {
    client: Arc<ApiClient>,
}

impl SignIn {
    /// Creates a new `SignIn` use case.
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Logs in, stores the token pair, then loads the user profile.
    ///
    /// # Errors
    /// - `ApiError::Unauthorized` on bad credentials
    /// - any error of `/auth/me`; the half-built session is cleared
    pub async fn execute(&self, input: SignInInput) -> ApiResult<SignInOutput> {
        let tokens: TokenPair = self
            .client
            .auth()
            .login(&LoginRequest {
                email: input.email,
                password: input.password,
            })
            .await?
            .into();

        let store = self.client.store();
        store.set_session(Session::from_tokens(tokens));

        let user = match self.client.auth().me().await {
            Ok(user) => user,
            Err(error) => {
                store.clear();
                return Err(error);
            }
        };
        store.set_user(user.clone());
        info!(email = %user.email, user_type = ?user.user_type, "signed in");

        Ok(SignInOutput { user })
    }
}
