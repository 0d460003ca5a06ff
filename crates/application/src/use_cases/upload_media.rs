//! Media upload use case.

use std::sync::Arc;

use flockloop_domain::{MediaRead, MediaType, UploadRequest};
use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Input for uploading a media object.
#[derive(Debug, Clone)]
pub struct UploadMediaInput {
    /// Original file name.
    pub filename: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// What the object is used for.
    pub media_type: MediaType,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Use case for uploading a file to object storage.
pub struct UploadMedia {
    client: Arc<ApiClient>,
}

impl UploadMedia {
    /// Creates a new `UploadMedia` use case.
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Requests a presigned URL, PUTs the bytes, then confirms the upload.
    ///
    /// # Errors
    /// Returns the error of the first step that fails; an object whose PUT
    /// failed is left unconfirmed.
    pub async fn execute(&self, input: UploadMediaInput) -> ApiResult<MediaRead> {
        let media = self.client.media();
        let target = media
            .upload_url(&UploadRequest {
                filename: input.filename,
                content_type: input.content_type.clone(),
                media_type: input.media_type,
            })
            .await?;

        let size = input.bytes.len();
        media
            .upload_to_storage(&target.upload_url, input.bytes, &input.content_type)
            .await?;

        let confirmed = media.confirm_upload(target.media_id).await?;
        info!(media_id = %confirmed.id, size, "media uploaded");
        Ok(confirmed)
    }
}
