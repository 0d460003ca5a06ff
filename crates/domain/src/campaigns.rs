//! Campaign types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage_url::{RewriteStorageUrls, StorageUrlRewriter};
use crate::tracks::TrackSummary;

/// Streaming service a campaign links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Spotify link.
    Spotify,
    /// `SoundCloud` link.
    Soundcloud,
}

/// A promotional campaign for one track.
///
/// The extended fields are optional because not every backend version
/// returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRead {
    /// Campaign identifier.
    pub id: Uuid,
    /// Campaign name.
    pub name: String,
    /// Owning organisation.
    pub organisation_id: Uuid,
    /// Promoted track.
    pub track_id: Uuid,
    /// Manager who created the campaign.
    pub created_by_id: Uuid,
    /// Embedded track details.
    pub track: TrackSummary,
    /// Music genres.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Content styles.
    #[serde(default)]
    pub styles: Vec<String>,
    /// Target platforms.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Streaming link.
    #[serde(default)]
    pub link: Option<String>,
    /// Kind of streaming link.
    #[serde(default)]
    pub link_type: Option<LinkType>,
    /// Submission cap.
    #[serde(default)]
    pub max_submissions: Option<u32>,
    /// Submissions received so far.
    #[serde(default)]
    pub submissions_count: Option<u32>,
}

impl CampaignRead {
    /// Returns true when the campaign has a cap and has reached it.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(
            (self.max_submissions, self.submissions_count),
            (Some(max), Some(count)) if count >= max
        )
    }
}

impl RewriteStorageUrls for CampaignRead {
    fn rewrite_storage_urls(mut self, rewriter: &StorageUrlRewriter) -> Self {
        self.track = self.track.rewrite_storage_urls(rewriter);
        self
    }
}

/// Body of `POST /campaigns/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    /// Campaign name.
    pub name: String,
    /// Track to promote.
    pub track_id: Uuid,
}
