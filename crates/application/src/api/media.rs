use flockloop_domain::{ApiRequest, DownloadResponse, MediaRead, UploadRequest, UploadResponse};
use tracing::debug;
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiResult;

/// `/media` endpoints and the presigned object-storage upload.
#[derive(Debug, Clone, Copy)]
pub struct MediaApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MediaApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Requests a presigned upload URL for a new media object.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn upload_url(&self, body: &UploadRequest) -> ApiResult<UploadResponse> {
        let request = ApiRequest::post("/media/upload-url").with_json(body)?;
        self.client.fetch(&request).await
    }

    /// Marks an uploaded object as complete.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn confirm_upload(&self, media_id: Uuid) -> ApiResult<MediaRead> {
        self.client
            .fetch(&ApiRequest::post(format!("/media/{media_id}/confirm")))
            .await
    }

    /// Requests a presigned download URL, rewritten to the public origin.
    ///
    /// # Errors
    ///
    /// Any `ApiError` from the backend.
    pub async fn download_url(&self, media_id: Uuid) -> ApiResult<DownloadResponse> {
        self.client
            .fetch_rewritten(&ApiRequest::get(format!("/media/{media_id}/download-url")))
            .await
    }

    /// PUTs `bytes` to a presigned URL.
    ///
    /// Sent on the raw transport: the URL carries its own authorization and
    /// storage rejects a bearer header.
    ///
    /// # Errors
    ///
    /// `ApiError::Status` if storage rejects the upload.
    pub async fn upload_to_storage(
        &self,
        upload_url: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<()> {
        let url = self.client.rewriter().rewrite(upload_url);
        debug!(size = bytes.len(), content_type, "uploading to object storage");
        let request = ApiRequest::put(url).with_body(bytes, content_type);
        self.client
            .transport()
            .send_unauthenticated(&request)
            .await
            .map(|_| ())
    }
}
