use flockloop_domain::{ApiRequest, TrackCreate, TrackRead};
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiResult;

/// `/tracks` endpoints. Thumbnail URLs are rewritten to the public storage
/// origin.
#[derive(Debug, Clone, Copy)]
pub struct TracksApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TracksApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists the organisation's tracks.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn list(&self) -> ApiResult<Vec<TrackRead>> {
        self.client.fetch_rewritten(&ApiRequest::get("/tracks/")).await
    }

    /// Fetches one track.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn get(&self, track_id: Uuid) -> ApiResult<TrackRead> {
        self.client
            .fetch_rewritten(&ApiRequest::get(format!("/tracks/{track_id}")))
            .await
    }

    /// Registers an uploaded song as a track.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn create(&self, body: &TrackCreate) -> ApiResult<TrackRead> {
        let request = ApiRequest::post("/tracks/").with_json(body)?;
        self.client.fetch_rewritten(&request).await
    }
}
