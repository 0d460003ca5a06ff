//! Object-storage URL rewriting
//!
//! The backend signs URLs against its internal object-storage endpoint
//! (e.g. `http://minio:9000`), which is not reachable from the client.
//! The rewriter swaps that origin for a reachable one.

use serde::{Deserialize, Serialize};

/// Internal storage origin used by the backend's default deployment.
pub const DEFAULT_INTERNAL_ORIGIN: &str = "http://minio:9000";

/// Client-reachable storage origin of the default deployment.
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:9000";

/// Replaces an internal storage origin prefix with a public one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageUrlRewriter {
    /// Origin as emitted by the backend.
    pub internal_origin: String,
    /// Origin reachable by this client.
    pub public_origin: String,
}

impl StorageUrlRewriter {
    /// Creates a rewriter.
    #[must_use]
    pub fn new(internal_origin: impl Into<String>, public_origin: impl Into<String>) -> Self {
        Self {
            internal_origin: internal_origin.into(),
            public_origin: public_origin.into(),
        }
    }

    /// Rewrites `url` if it starts with the internal origin; returns it unchanged otherwise.
    #[must_use]
    pub fn rewrite(&self, url: &str) -> String {
        if self.internal_origin.is_empty() {
            return url.to_string();
        }
        url.strip_prefix(&self.internal_origin).map_or_else(
            || url.to_string(),
            |rest| format!("{}{rest}", self.public_origin),
        )
    }
}

impl Default for StorageUrlRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERNAL_ORIGIN, DEFAULT_PUBLIC_ORIGIN)
    }
}

/// Types that carry presigned storage URLs.
pub trait RewriteStorageUrls: Sized {
    /// Returns `self` with every storage URL passed through `rewriter`.
    #[must_use]
    fn rewrite_storage_urls(self, rewriter: &StorageUrlRewriter) -> Self;
}

impl<T: RewriteStorageUrls> RewriteStorageUrls for Vec<T> {
    fn rewrite_storage_urls(self, rewriter: &StorageUrlRewriter) -> Self {
        self.into_iter()
            .map(|item| item.rewrite_storage_urls(rewriter))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rewrites_matching_prefix() {
        let rewriter = StorageUrlRewriter::default();
        assert_eq!(
            rewriter.rewrite("http://minio:9000/flockloop/a.mp3?X-Amz-Signature=1"),
            "http://localhost:9000/flockloop/a.mp3?X-Amz-Signature=1"
        );
    }

    #[test]
    fn test_leaves_other_urls_alone() {
        let rewriter = StorageUrlRewriter::default();
        let url = "https://cdn.example.com/http://minio:9000/a.mp3";
        assert_eq!(rewriter.rewrite(url), url);
    }

    #[test]
    fn test_empty_internal_origin_disables_rewrite() {
        let rewriter = StorageUrlRewriter::new("", "http://localhost:9000");
        assert_eq!(rewriter.rewrite("http://minio:9000/a"), "http://minio:9000/a");
    }
}
