use flockloop_domain::{
    ApiRequest, InvitationAcceptRequest, InvitationRead, InvitationSendRequest, MessageResponse,
    OrgRegistrationRequest, OrgRegistrationResponse,
};
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiResult;

/// `/organisations` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct OrganisationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrganisationsApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Registers an organisation together with its first manager.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn register(
        &self,
        body: &OrgRegistrationRequest,
    ) -> ApiResult<OrgRegistrationResponse> {
        let request = ApiRequest::post("/organisations/register").with_json(body)?;
        self.client.fetch(&request).await
    }

    /// Invites a manager into the caller's organisation.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn send_invitation(&self, body: &InvitationSendRequest) -> ApiResult<MessageResponse> {
        let request = ApiRequest::post("/organisations/invitations").with_json(body)?;
        self.client.fetch(&request).await
    }

    /// Accepts an invitation, creating the invited account.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn accept_invitation(
        &self,
        body: &InvitationAcceptRequest,
    ) -> ApiResult<MessageResponse> {
        let request = ApiRequest::post("/organisations/invitations/accept").with_json(body)?;
        self.client.fetch(&request).await
    }

    /// Lists the invitations of the caller's organisation.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn list_invitations(&self) -> ApiResult<Vec<InvitationRead>> {
        self.client
            .fetch(&ApiRequest::get("/organisations/invitations"))
            .await
    }

    /// Revokes a pending invitation.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn revoke_invitation(&self, invitation_id: Uuid) -> ApiResult<MessageResponse> {
        let path = format!("/organisations/invitations/{invitation_id}/revoke");
        self.client.fetch(&ApiRequest::post(path)).await
    }
}
