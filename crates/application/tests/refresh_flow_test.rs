//! Refresh-and-retry behaviour of the authenticated transport.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod support;

use std::sync::Arc;

use flockloop_application::auth::{AuthenticatedTransport, HttpRefreshEndpoint};
use flockloop_application::{
    ApiError, HttpTransport, InMemoryTokenStore, RefreshCoordinator, TokenStore,
};
use flockloop_domain::{ApiRequest, HttpMethod, Session, StatusCode, TokenPair, UserRead};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{FakeBackend, SHORT, authenticated, signed_in_store, until};

#[tokio::test]
async fn test_valid_token_is_attached_and_nothing_refreshes() {
    let backend = FakeBackend::new();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    let response = transport.send(&ApiRequest::get("/campaigns/")).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(backend.bearers_for("/campaigns/"), vec![Some("T1".to_string())]);
    assert_eq!(backend.refresh_calls(), 0);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.gate_refresh();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);
    let coordinator = transport.coordinator().clone();

    let req_a = ApiRequest::get("/a");
    let req_b = ApiRequest::get("/b");
    let req_c = ApiRequest::get("/c");
    let (a, b, c, ()) = tokio::join!(
        transport.send(&req_a),
        transport.send(&req_b),
        transport.send(&req_c),
        async {
            until(|| coordinator.pending() == 2).await;
            assert!(coordinator.is_refreshing());
            assert_eq!(coordinator.pending_labels(), vec!["GET /b", "GET /c"]);
            backend.release_refresh();
        }
    );

    for result in [a, b, c] {
        assert_eq!(result.unwrap().status, StatusCode::OK);
    }
    assert_eq!(backend.refresh_calls(), 1);
    for path in ["/a", "/b", "/c"] {
        assert_eq!(
            backend.bearers_for(path),
            vec![Some("T1".to_string()), Some("T2".to_string())]
        );
    }
    assert_eq!(store.access_token().as_deref(), Some("T2"));
    assert_eq!(store.refresh_token().as_deref(), Some("R2"));
    assert!(!coordinator.is_refreshing());
    assert_eq!(coordinator.pending(), 0);
}

#[tokio::test]
async fn test_second_401_is_returned_without_another_refresh() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.reject_always("/admin");
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    let error = transport.send(&ApiRequest::get("/admin")).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(backend.bearers_for("/admin").len(), 2);
    assert_eq!(store.access_token().as_deref(), Some("T2"));
}

#[tokio::test]
async fn test_401_from_login_clears_store_without_refresh() {
    let backend = FakeBackend::new();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    let request = ApiRequest::post("/auth/login")
        .with_json(&json!({"email": "dj@label.example", "password": "wrong"}))
        .unwrap();
    let error = transport.send(&request).await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Unauthorized {
            detail: Some("Incorrect email or password".to_string())
        }
    );
    assert_eq!(backend.refresh_calls(), 0);
    assert_eq!(store.session(), Session::default());
}

#[tokio::test]
async fn test_401_from_refresh_path_is_not_recovered() {
    let backend = FakeBackend::new();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    let request = ApiRequest::post("/auth/refresh")
        .with_json(&json!({"refresh_token": "stale"}))
        .unwrap();
    let error = transport.send(&request).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 1);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_missing_refresh_token_clears_store() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    let store = Arc::new(flockloop_application::InMemoryTokenStore::with_session(Session {
        token: Some("T1".to_string()),
        refresh_token: None,
        user: None,
    }));
    let transport = authenticated(&backend, &store);

    let error = transport.send(&ApiRequest::get("/tracks/")).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 0);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_signed_out_request_carries_no_authorization() {
    let backend = FakeBackend::new();
    let store = Arc::new(flockloop_application::InMemoryTokenStore::new());
    let transport = authenticated(&backend, &store);

    let error = transport.send(&ApiRequest::get("/auth/me")).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(backend.bearers_for("/auth/me"), vec![None]);
    assert_eq!(backend.refresh_calls(), 0);
}

#[tokio::test]
async fn test_failed_refresh_rejects_everyone_and_signs_out() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.fail_refresh(503);
    backend.gate_refresh();
    let store = signed_in_store();
    let mut events = store.subscribe();
    let transport = authenticated(&backend, &store);
    let coordinator = transport.coordinator().clone();

    let req_a = ApiRequest::get("/a");
    let req_b = ApiRequest::get("/b");
    let req_c = ApiRequest::get("/c");
    let (a, b, c, ()) = tokio::join!(
        transport.send(&req_a),
        transport.send(&req_b),
        transport.send(&req_c),
        async {
            until(|| coordinator.pending() == 2).await;
            backend.release_refresh();
        }
    );

    let expected = ApiError::Status {
        status: StatusCode(503),
        detail: Some("refresh unavailable".to_string()),
    };
    for result in [a, b, c] {
        assert_eq!(result.unwrap_err(), expected);
    }
    assert_eq!(backend.refresh_calls(), 1);
    for path in ["/a", "/b", "/c"] {
        assert_eq!(backend.bearers_for(path).len(), 1, "{path} must not be resent");
    }
    assert_eq!(store.session(), Session::default());
    assert!(!coordinator.is_refreshing());
    assert_eq!(
        events.try_recv().unwrap(),
        flockloop_application::SessionEvent::SignedOut
    );
}

#[tokio::test]
async fn test_later_401_starts_a_new_refresh() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    transport.send(&ApiRequest::get("/a")).await.unwrap();
    backend.expire_access_token();
    transport.send(&ApiRequest::get("/b")).await.unwrap();

    assert_eq!(backend.refresh_calls(), 2);
    assert_eq!(store.access_token().as_deref(), Some("T3"));
    assert_eq!(store.refresh_token().as_deref(), Some("R3"));
}

#[tokio::test]
async fn test_cancelled_refresher_interrupts_waiters() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.gate_refresh();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);
    let coordinator = transport.coordinator().clone();

    let req_a = ApiRequest::get("/a");
    let (leader, waiter) = tokio::join!(
        tokio::time::timeout(SHORT, transport.send(&req_a)),
        async {
            until(|| coordinator.is_refreshing()).await;
            transport.send(&ApiRequest::get("/b")).await
        }
    );

    assert!(leader.is_err(), "leader should have been cancelled");
    assert_eq!(waiter.unwrap_err(), ApiError::RefreshInterrupted);
    assert!(!coordinator.is_refreshing());
    assert_eq!(coordinator.pending(), 0);
}

#[tokio::test]
async fn test_refresh_timeout_follows_failure_path() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.gate_refresh();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store).with_refresh_timeout(Some(SHORT));

    let error = transport.send(&ApiRequest::get("/a")).await.unwrap_err();

    assert_eq!(error, ApiError::RefreshTimedOut(SHORT));
    assert!(!store.is_authenticated());
    assert!(!transport.coordinator().is_refreshing());
}

#[tokio::test]
async fn test_other_error_statuses_pass_through() {
    let backend = FakeBackend::new();
    backend.route(
        HttpMethod::Get,
        "/campaigns/missing",
        404,
        json!({"detail": "Campaign not found"}),
    );
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    let error = transport
        .send(&ApiRequest::get("/campaigns/missing"))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        ApiError::Status {
            status: StatusCode(404),
            detail: Some("Campaign not found".to_string())
        }
    );
    assert_eq!(error.user_message(), "Campaign not found");
    assert_eq!(backend.refresh_calls(), 0);
    assert_eq!(store.access_token().as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_invalid_request_is_never_sent() {
    let backend = FakeBackend::new();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);

    let error = transport.send(&ApiRequest::get("tracks")).await.unwrap_err();

    assert!(matches!(error, ApiError::InvalidRequest(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_queued_request_rejected_again_is_not_refreshed_twice() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.reject_always("/b");
    backend.gate_refresh();
    let store = signed_in_store();
    let transport = authenticated(&backend, &store);
    let coordinator = transport.coordinator().clone();

    let req_a = ApiRequest::get("/a");
    let req_b = ApiRequest::get("/b");
    let (a, b, ()) = tokio::join!(
        transport.send(&req_a),
        transport.send(&req_b),
        async {
            until(|| coordinator.pending() == 1).await;
            assert_eq!(coordinator.pending_labels(), vec!["GET /b"]);
            backend.release_refresh();
        }
    );

    assert_eq!(a.unwrap().status, StatusCode::OK);
    assert!(b.unwrap_err().is_unauthorized());
    assert_eq!(
        backend.bearers_for("/b"),
        vec![Some("T1".to_string()), Some("T2".to_string())]
    );
    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(store.access_token().as_deref(), Some("T2"));
}

/// Records whether a refresh was still in flight each time the store is cleared.
struct SignOutRecorder {
    inner: InMemoryTokenStore,
    coordinator: Arc<RefreshCoordinator>,
    refreshing_at_clear: Mutex<Vec<bool>>,
}

impl TokenStore for SignOutRecorder {
    fn session(&self) -> Session {
        self.inner.session()
    }

    fn set_session(&self, session: Session) {
        self.inner.set_session(session);
    }

    fn set_tokens(&self, tokens: TokenPair) {
        self.inner.set_tokens(tokens);
    }

    fn set_user(&self, user: UserRead) {
        self.inner.set_user(user);
    }

    fn clear(&self) {
        self.refreshing_at_clear
            .lock()
            .push(self.coordinator.is_refreshing());
        self.inner.clear();
    }
}

#[tokio::test]
async fn test_failed_refresh_signs_out_before_freeing_coordinator() {
    let backend = FakeBackend::new();
    backend.expire_access_token();
    backend.fail_refresh(401);
    let coordinator = Arc::new(RefreshCoordinator::new());
    let store = Arc::new(SignOutRecorder {
        inner: InMemoryTokenStore::with_session(Session::from_tokens(TokenPair::new("T1", "R1"))),
        coordinator: coordinator.clone(),
        refreshing_at_clear: Mutex::new(Vec::new()),
    });
    let raw: Arc<dyn HttpTransport> = backend.clone();
    let transport = AuthenticatedTransport::new(
        raw.clone(),
        store.clone(),
        Arc::new(HttpRefreshEndpoint::new(raw)),
    )
    .with_coordinator(coordinator.clone());

    let error = transport.send(&ApiRequest::get("/a")).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(*store.refreshing_at_clear.lock(), vec![true]);
    assert!(!coordinator.is_refreshing());

    // A 401 arriving now finds nothing to refresh with.
    let late = transport.send(&ApiRequest::get("/b")).await.unwrap_err();
    assert!(late.is_unauthorized());
    assert_eq!(backend.refresh_calls(), 1);
}
