use flockloop_domain::{ApiRequest, CampaignCreate, CampaignRead};
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiResult;

/// `/campaigns` endpoints. Embedded track thumbnails are rewritten to the
/// public storage origin.
#[derive(Debug, Clone, Copy)]
pub struct CampaignsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CampaignsApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists campaigns visible to the caller.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn list(&self) -> ApiResult<Vec<CampaignRead>> {
        self.client
            .fetch_rewritten(&ApiRequest::get("/campaigns/"))
            .await
    }

    /// Fetches one campaign.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn get(&self, campaign_id: Uuid) -> ApiResult<CampaignRead> {
        self.client
            .fetch_rewritten(&ApiRequest::get(format!("/campaigns/{campaign_id}")))
            .await
    }

    /// Creates a campaign for one of the organisation's tracks.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn create(&self, body: &CampaignCreate) -> ApiResult<CampaignRead> {
        let request = ApiRequest::post("/campaigns/").with_json(body)?;
        self.client.fetch_rewritten(&request).await
    }
}
