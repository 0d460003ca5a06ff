//! Wiring of the client from configuration.

use std::sync::Arc;

use anyhow::Context as _;
use flockloop_application::auth::{AuthenticatedTransport, HttpRefreshEndpoint};
use flockloop_application::{ApiClient, HttpTransport};
use flockloop_infrastructure::{ClientConfig, FileTokenStore, ReqwestTransport};
use tracing::debug;

/// Everything a command needs.
#[derive(Debug)]
pub struct ClientContext {
    /// Typed API client.
    pub client: Arc<ApiClient>,
    /// Persistent session.
    pub store: Arc<FileTokenStore>,
    /// Effective configuration.
    pub config: ClientConfig,
}

impl ClientContext {
    /// Builds the transport stack described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid, the session file cannot
    /// be read, or the HTTP client cannot be created.
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let base_url = config.base_url()?;
        let session_path = config.session_path()?;
        debug!(api_url = %base_url, session = %session_path.display(), "building client");

        let raw: Arc<dyn HttpTransport> = Arc::new(
            ReqwestTransport::with_timeout(base_url, config.request_timeout())
                .context("failed to create HTTP client")?,
        );
        let store = Arc::new(FileTokenStore::open(session_path)?);
        let transport = AuthenticatedTransport::new(
            raw.clone(),
            store.clone(),
            Arc::new(HttpRefreshEndpoint::new(raw)),
        )
        .with_refresh_timeout(config.refresh_timeout());
        let client = ApiClient::new(Arc::new(transport)).with_storage_rewriter(config.storage.clone());

        Ok(Self {
            client: Arc::new(client),
            store,
            config,
        })
    }
}
