//! Media object types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage_url::{RewriteStorageUrls, StorageUrlRewriter};

/// Kind of media object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Audio track.
    Song,
    /// Promotional video.
    Video,
    /// Artwork or video thumbnail.
    Thumbnail,
}

/// Processing state of a media object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    /// Upload URL issued, upload not yet confirmed.
    Pending,
    /// Uploaded and confirmed.
    Ready,
    /// Rejected by validation.
    Rejected,
}

/// Body of `POST /media/upload-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Original file name.
    pub filename: String,
    /// MIME type of the file.
    pub content_type: String,
    /// Kind of media being uploaded.
    pub media_type: MediaType,
}

/// Presigned upload target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Media object to confirm after upload.
    pub media_id: Uuid,
    /// Presigned PUT URL.
    pub upload_url: String,
    /// Object-storage key.
    pub s3_key: String,
}

/// A stored media object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRead {
    /// Media identifier.
    pub id: Uuid,
    /// Original file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Kind of media.
    pub media_type: MediaType,
    /// Object-storage key.
    pub s3_key: String,
    /// Size once confirmed.
    pub size_bytes: Option<u64>,
    /// Processing state.
    pub status: MediaStatus,
    /// Uploading user.
    pub uploaded_by_id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Thumbnail generated from a video upload.
    pub auto_thumbnail_id: Option<Uuid>,
}

/// Presigned download target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResponse {
    /// Media object.
    pub media_id: Uuid,
    /// Presigned GET URL.
    pub download_url: String,
}

impl RewriteStorageUrls for DownloadResponse {
    fn rewrite_storage_urls(mut self, rewriter: &StorageUrlRewriter) -> Self {
        self.download_url = rewriter.rewrite(&self.download_url);
        self
    }
}
