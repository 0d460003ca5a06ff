//! Organisation registration and invitation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /organisations/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgRegistrationRequest {
    /// Name of the new organisation.
    pub org_name: String,
    /// Email of the first (admin) manager.
    pub email: String,
    /// Display name of the first manager.
    pub name: String,
    /// Password of the first manager.
    pub password: String,
}

/// Result of registering an organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRegistrationResponse {
    /// Human-readable message.
    pub message: String,
    /// Identifier of the created organisation.
    pub organisation_id: Uuid,
}

/// Body of `POST /organisations/invitations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationSendRequest {
    /// Address to invite.
    pub email: String,
}

/// Body of `POST /organisations/invitations/accept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationAcceptRequest {
    /// Token from the invitation email.
    pub token: String,
    /// Display name of the new manager.
    pub name: String,
    /// Password of the new manager.
    pub password: String,
}

/// Lifecycle of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Sent, not yet used.
    Pending,
    /// Used to create an account.
    Accepted,
    /// Past its expiry date.
    Expired,
    /// Withdrawn by an administrator.
    Revoked,
}

/// An invitation as listed by `GET /organisations/invitations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRead {
    /// Invitation identifier.
    pub id: Uuid,
    /// Invited address.
    pub email: String,
    /// Current status.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
    /// When the invitation stops being usable.
    pub expires_at: DateTime<Utc>,
}

impl InvitationRead {
    /// Returns true if the invitation can still be revoked.
    #[must_use]
    pub fn is_revocable(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}
