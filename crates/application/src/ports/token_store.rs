//! Token store port

use flockloop_domain::{Session, TokenPair, UserRead};

/// Holder of the current session.
///
/// Reads are synchronous because the store is consulted on every request.
/// Every write replaces the whole session record; readers never observe a
/// half-updated pair.
pub trait TokenStore: Send + Sync {
    /// Returns a snapshot of the whole session.
    fn session(&self) -> Session;

    /// Replaces the whole session (login).
    fn set_session(&self, session: Session);

    /// Replaces the token pair, keeping the user (refresh).
    fn set_tokens(&self, tokens: TokenPair);

    /// Replaces the authenticated user.
    fn set_user(&self, user: UserRead);

    /// Drops the whole session (logout).
    fn clear(&self);

    /// Current access token.
    fn access_token(&self) -> Option<String> {
        self.session().token
    }

    /// Current refresh token.
    fn refresh_token(&self) -> Option<String> {
        self.session().refresh_token
    }

    /// Current user, once loaded.
    fn user(&self) -> Option<UserRead> {
        self.session().user
    }

    /// Returns true when an access token is present.
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Returns true when the current user is a content creator.
    fn is_creator(&self) -> bool {
        self.user().is_some_and(|user| user.is_creator())
    }

    /// Returns true when the current user is a campaign manager.
    fn is_manager(&self) -> bool {
        self.user().is_some_and(|user| user.is_manager())
    }

    /// Returns true when the current user administers their organisation.
    fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin)
    }
}
