//! Authentication and session types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two account kinds of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Produces promotional video content.
    ContentCreator,
    /// Runs campaigns on behalf of a label or artist.
    CampaignManager,
}

/// Authenticated user profile as returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRead {
    /// User identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account kind.
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// Whether the email address has been confirmed.
    pub is_verified: bool,
    /// Organisation of a campaign manager.
    pub organisation_id: Option<Uuid>,
    /// Organisation administrator flag.
    pub is_admin: bool,
}

impl UserRead {
    /// Returns true for content creators.
    #[must_use]
    pub const fn is_creator(&self) -> bool {
        matches!(self.user_type, UserType::ContentCreator)
    }

    /// Returns true for campaign managers.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.user_type, UserType::CampaignManager)
    }
}

/// An access/refresh token pair. Always replaced as a whole.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Credential exchanged for a new pair at `/auth/refresh`.
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &token_preview(&self.access_token))
            .field("refresh_token", &token_preview(&self.refresh_token))
            .finish()
    }
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.refresh_token)
    }
}

/// The complete record held by a token store.
///
/// Field names match the persisted auth state of the web client
/// (`token`, `refreshToken`, `user`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Current access token.
    pub token: Option<String>,
    /// Current refresh token.
    pub refresh_token: Option<String>,
    /// Authenticated user, once fetched.
    pub user: Option<UserRead>,
}

impl Session {
    /// Creates a session from a token pair with no user loaded yet.
    #[must_use]
    pub fn from_tokens(tokens: TokenPair) -> Self {
        Self {
            token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            user: None,
        }
    }

    /// Returns a copy of this session with the token pair replaced.
    #[must_use]
    pub fn with_tokens(&self, tokens: TokenPair) -> Self {
        Self {
            token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            user: self.user.clone(),
        }
    }

    /// Returns true when an access token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_deref().map(token_preview))
            .field("refresh_token", &self.refresh_token.as_deref().map(token_preview))
            .field("user", &self.user.as_ref().map(|u| &u.email))
            .finish()
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
}

/// Token pair issued by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Token type, always `bearer`.
    pub token_type: String,
}

/// Body of `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token to exchange.
    pub refresh_token: String,
}

/// Generic `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Body of `POST /auth/resend-confirmation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendConfirmationRequest {
    /// Address to send the confirmation email to.
    pub email: String,
}

/// Get a preview of a token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.len() > 12 {
        format!("{}...", token.get(..8).unwrap_or(token))
    } else {
        token.to_string()
    }
}
