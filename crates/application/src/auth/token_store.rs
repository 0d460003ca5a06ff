//! In-memory session storage.
//!
//! Holds the one [`Session`] of the client and announces every change on a
//! broadcast channel so that consumers can react to sign-out.

use flockloop_domain::{Session, TokenPair, UserRead, token_preview};
use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::ports::TokenStore;

const EVENT_CAPACITY: usize = 16;

/// Change notifications published by [`InMemoryTokenStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A whole session was stored (login).
    SignedIn {
        /// Preview of the new access token.
        token_preview: Option<String>,
    },
    /// The token pair was replaced (refresh).
    TokensRefreshed {
        /// Preview of the new access token.
        token_preview: String,
    },
    /// The user profile was replaced.
    UserUpdated {
        /// Email of the user.
        email: String,
    },
    /// The session was dropped.
    SignedOut,
}

/// Thread-safe in-memory token store.
#[derive(Debug)]
pub struct InMemoryTokenStore {
    session: RwLock<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl InMemoryTokenStore {
    /// Creates an empty (signed-out) store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(Session::default())
    }

    /// Creates a store seeded with `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            session: RwLock::new(session),
            events,
        }
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn session(&self) -> Session {
        self.session.read().clone()
    }

    fn set_session(&self, session: Session) {
        let preview = session.token.as_deref().map(token_preview);
        *self.session.write() = session;
        self.publish(SessionEvent::SignedIn {
            token_preview: preview,
        });
    }

    fn set_tokens(&self, tokens: TokenPair) {
        let preview = token_preview(&tokens.access_token);
        {
            let mut session = self.session.write();
            *session = session.with_tokens(tokens);
        }
        self.publish(SessionEvent::TokensRefreshed {
            token_preview: preview,
        });
    }

    fn set_user(&self, user: UserRead) {
        let email = user.email.clone();
        self.session.write().user = Some(user);
        self.publish(SessionEvent::UserUpdated { email });
    }

    fn clear(&self) {
        *self.session.write() = Session::default();
        self.publish(SessionEvent::SignedOut);
    }

    fn access_token(&self) -> Option<String> {
        self.session.read().token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.session.read().refresh_token.clone()
    }
}
