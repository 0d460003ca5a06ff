//! Track types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage_url::{RewriteStorageUrls, StorageUrlRewriter};

/// A track uploaded by a campaign manager's organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRead {
    /// Track identifier.
    pub id: Uuid,
    /// Track title.
    pub title: String,
    /// Performing artist.
    pub artist: String,
    /// Owning organisation.
    pub organisation_id: Uuid,
    /// Audio media object.
    pub media_id: Uuid,
    /// Optional artwork media object.
    pub thumbnail_id: Option<Uuid>,
    /// Presigned artwork URL.
    pub thumbnail_url: Option<String>,
}

/// Body of `POST /tracks/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCreate {
    /// Track title.
    pub title: String,
    /// Performing artist.
    pub artist: String,
    /// Confirmed audio media object.
    pub media_id: Uuid,
    /// Optional confirmed artwork media object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_id: Option<Uuid>,
}

/// Track fields embedded in a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Track identifier.
    pub id: Uuid,
    /// Track title.
    pub title: String,
    /// Performing artist.
    pub artist: String,
    /// Presigned artwork URL.
    pub thumbnail_url: Option<String>,
}

impl RewriteStorageUrls for TrackRead {
    fn rewrite_storage_urls(mut self, rewriter: &StorageUrlRewriter) -> Self {
        self.thumbnail_url = self.thumbnail_url.map(|url| rewriter.rewrite(&url));
        self
    }
}

impl RewriteStorageUrls for TrackSummary {
    fn rewrite_storage_urls(mut self, rewriter: &StorageUrlRewriter) -> Self {
        self.thumbnail_url = self.thumbnail_url.map(|url| rewriter.rewrite(&url));
        self
    }
}
