//! Submission types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting review.
    Pending,
    /// Approved by a campaign manager.
    Accepted,
    /// Declined by a campaign manager.
    Rejected,
}

/// Decision a manager can make on a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionDecision {
    /// Approve the submission.
    Accepted,
    /// Decline the submission.
    Rejected,
}

/// Content submitted by a creator to a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRead {
    /// Submission identifier.
    pub id: Uuid,
    /// Review state.
    pub status: SubmissionStatus,
    /// Target campaign.
    pub campaign_id: Uuid,
    /// Uploaded video.
    pub media_id: Option<Uuid>,
    /// Uploaded or generated thumbnail.
    pub thumbnail_id: Option<Uuid>,
    /// Submitting creator.
    pub content_creator_id: Uuid,
    /// Reviewer feedback.
    pub feedback: Option<String>,
    /// Reviewing manager.
    pub reviewed_by_id: Option<Uuid>,
    /// Review time.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Body of `POST /submissions/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionCreate {
    /// Target campaign.
    pub campaign_id: Uuid,
    /// Confirmed video media object.
    pub media_id: Uuid,
    /// Optional confirmed thumbnail media object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_id: Option<Uuid>,
}

/// Body of `PATCH /submissions/{id}/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReview {
    /// Accept or reject.
    pub decision: SubmissionDecision,
    /// Optional feedback for the creator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
