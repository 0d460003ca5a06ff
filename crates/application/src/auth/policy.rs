//! Which requests may trigger a token refresh.

use flockloop_domain::ApiRequest;

/// Path fragment of the refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Path fragment of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

/// Decides whether a 401 on a request may be recovered by refreshing.
///
/// A 401 from the refresh or login endpoint means the credentials
/// themselves are bad, so refreshing would only loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPolicy {
    excluded: Vec<String>,
}

impl RecoveryPolicy {
    /// Creates a policy excluding every path containing one of `fragments`.
    #[must_use]
    pub fn excluding<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if a 401 on `request` may be recovered by refreshing.
    #[must_use]
    pub fn is_recoverable(&self, request: &ApiRequest) -> bool {
        !self
            .excluded
            .iter()
            .any(|fragment| request.path.contains(fragment.as_str()))
    }
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self::excluding([REFRESH_PATH, LOGIN_PATH])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_auth_endpoints() {
        let policy = RecoveryPolicy::default();
        assert!(!policy.is_recoverable(&ApiRequest::post("/auth/refresh")));
        assert!(!policy.is_recoverable(&ApiRequest::post("/auth/login")));
        assert!(!policy.is_recoverable(&ApiRequest::post("/v1/auth/login?next=/")));
        assert!(policy.is_recoverable(&ApiRequest::get("/auth/me")));
        assert!(policy.is_recoverable(&ApiRequest::get("/campaigns/")));
    }
}
