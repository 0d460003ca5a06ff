//! Request descriptors
//!
//! An [`ApiRequest`] is an immutable description of one HTTP call. Every
//! mutation helper returns a new value so a descriptor can be cloned, replayed
//! and re-authorized without the original caller observing the change.

use std::fmt;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Name of the header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// Name of the content type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// JSON media type used for every backend call.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods used by the Flockloop backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// Reads.
    #[default]
    Get,
    /// Creates and actions.
    Post,
    /// Presigned object-storage uploads.
    Put,
    /// Submission reviews.
    Patch,
    /// Deletes.
    Delete,
}

impl HttpMethod {
    /// Returns whether requests with this method may carry a body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name, compared case-insensitively.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Description of an outgoing HTTP request.
///
/// `path` is resolved against the configured API base URL unless it is
/// already absolute (presigned object-storage URLs are).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the API base URL, or an absolute URL.
    pub path: String,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    /// Request headers, in insertion order.
    pub headers: Vec<Header>,
    /// Raw request body.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Adds a query string pair.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a header, replacing any existing header with the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|h| !h.name.eq_ignore_ascii_case(&name));
        self.headers.push(Header::new(name, value));
        self
    }

    /// Sets a raw body together with its content type.
    #[must_use]
    pub fn with_body(self, body: Vec<u8>, content_type: impl Into<String>) -> Self {
        let mut request = self.with_header(CONTENT_TYPE, content_type);
        request.body = Some(body);
        request
    }

    /// Serializes `payload` as the JSON body of this request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the payload cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> DomainResult<Self> {
        let body =
            serde_json::to_vec(payload).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(self.with_body(body, JSON_CONTENT_TYPE))
    }

    /// Returns a copy of this request carrying `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_bearer(&self, token: &str) -> Self {
        self.clone()
            .with_header(AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns the bearer token attached to this request, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.header(AUTHORIZATION)
            .and_then(|value| value.strip_prefix("Bearer "))
    }

    /// Returns true if `path` is a full URL rather than an API-relative path.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// Short `METHOD path` label used in logs.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Validates that the request can be sent.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidPath` for an empty path or a relative path
    ///   without a leading slash
    /// - `DomainError::InvalidHeader` for an empty name or a line break
    /// - `DomainError::InvalidBody` for a body on a GET or DELETE
    pub fn validate(&self) -> DomainResult<()> {
        if self.path.trim().is_empty() {
            return Err(DomainError::InvalidPath("path is empty".to_string()));
        }
        if !self.is_absolute() && !self.path.starts_with('/') {
            return Err(DomainError::InvalidPath(format!(
                "relative path must start with '/': {}",
                self.path
            )));
        }
        for header in &self.headers {
            if header.name.trim().is_empty() || header.name.contains(':') {
                return Err(DomainError::InvalidHeader(format!("bad name '{}'", header.name)));
            }
            if header.value.contains(['\r', '\n']) {
                return Err(DomainError::InvalidHeader(format!(
                    "line break in value of {}",
                    header.name
                )));
            }
        }
        if self.body.is_some() && !self.method.has_body() {
            return Err(DomainError::InvalidBody(format!(
                "{} requests carry no body",
                self.method
            )));
        }
        Ok(())
    }
}
