//! Typed client for the Flockloop REST API.
//!
//! [`ApiClient`] sends everything through an [`AuthenticatedTransport`] and
//! hands out one borrowed facade per backend resource.

mod auth;
mod campaigns;
mod media;
mod organisations;
mod submissions;
mod tracks;

pub use auth::AuthApi;
pub use campaigns::CampaignsApi;
pub use media::MediaApi;
pub use organisations::OrganisationsApi;
pub use submissions::SubmissionsApi;
pub use tracks::TracksApi;

use std::sync::Arc;

use flockloop_domain::{ApiRequest, ApiResponse, RewriteStorageUrls, StorageUrlRewriter};
use serde::de::DeserializeOwned;

use crate::auth::AuthenticatedTransport;
use crate::error::{ApiError, ApiResult};
use crate::ports::TokenStore;

/// Entry point to every backend resource.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<AuthenticatedTransport>,
    rewriter: StorageUrlRewriter,
}

impl ApiClient {
    /// Creates a client with the default storage origin rewrite.
    #[must_use]
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self {
            transport,
            rewriter: StorageUrlRewriter::default(),
        }
    }

    /// Replaces the storage origin rewrite.
    #[must_use]
    pub fn with_storage_rewriter(mut self, rewriter: StorageUrlRewriter) -> Self {
        self.rewriter = rewriter;
        self
    }

    /// Authentication endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Organisation and invitation endpoints.
    #[must_use]
    pub const fn organisations(&self) -> OrganisationsApi<'_> {
        OrganisationsApi::new(self)
    }

    /// Campaign endpoints.
    #[must_use]
    pub const fn campaigns(&self) -> CampaignsApi<'_> {
        CampaignsApi::new(self)
    }

    /// Track endpoints.
    #[must_use]
    pub const fn tracks(&self) -> TracksApi<'_> {
        TracksApi::new(self)
    }

    /// Submission endpoints.
    #[must_use]
    pub const fn submissions(&self) -> SubmissionsApi<'_> {
        SubmissionsApi::new(self)
    }

    /// Media endpoints.
    #[must_use]
    pub const fn media(&self) -> MediaApi<'_> {
        MediaApi::new(self)
    }

    /// The session store backing this client.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        self.transport.store()
    }

    /// The authenticated transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<AuthenticatedTransport> {
        &self.transport
    }

    /// The storage origin rewrite.
    #[must_use]
    pub const fn rewriter(&self) -> &StorageUrlRewriter {
        &self.rewriter
    }

    async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let response = self.transport.send(request).await?;
        decode(&response)
    }

    async fn fetch_rewritten<T>(&self, request: &ApiRequest) -> ApiResult<T>
    where
        T: DeserializeOwned + RewriteStorageUrls,
    {
        let value: T = self.fetch(request).await?;
        Ok(value.rewrite_storage_urls(&self.rewriter))
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ApiResult<T> {
    response
        .decode()
        .map_err(|e| ApiError::Decode(e.to_string()))
}
