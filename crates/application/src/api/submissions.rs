use flockloop_domain::{ApiRequest, SubmissionCreate, SubmissionRead, SubmissionReview};
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiResult;

/// `/submissions` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SubmissionsApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists the caller's submissions.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn list(&self) -> ApiResult<Vec<SubmissionRead>> {
        self.client.fetch(&ApiRequest::get("/submissions/")).await
    }

    /// Lists submissions made to one campaign.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn list_by_campaign(&self, campaign_id: Uuid) -> ApiResult<Vec<SubmissionRead>> {
        self.client
            .fetch(&ApiRequest::get(format!("/submissions/campaign/{campaign_id}")))
            .await
    }

    /// Submits a video to a campaign.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn create(&self, body: &SubmissionCreate) -> ApiResult<SubmissionRead> {
        let request = ApiRequest::post("/submissions/").with_json(body)?;
        self.client.fetch(&request).await
    }

    /// Accepts or rejects a submission.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn review(
        &self,
        submission_id: Uuid,
        review: &SubmissionReview,
    ) -> ApiResult<SubmissionRead> {
        let request =
            ApiRequest::patch(format!("/submissions/{submission_id}/review")).with_json(review)?;
        self.client.fetch(&request).await
    }
}
