//! Sign-out use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ApiClient;

/// Use case for ending the session.
pub struct SignOut {
    client: Arc<ApiClient>,
}

impl SignOut {
    /// Creates a new `SignOut` use case.
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Tells the backend to end the session, then clears the local session
    /// whatever the backend answered.
    pub async fn execute(&self) {
        if let Err(error) = self.client.auth().logout().await {
            warn!(%error, "server-side logout failed, clearing local session anyway");
        }
        self.client.store().clear();
        info!("signed out");
    }
}
