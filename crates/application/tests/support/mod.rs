//! In-process fake of the Flockloop backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use flockloop_application::auth::{AuthenticatedTransport, HttpRefreshEndpoint};
use flockloop_application::{
    ApiClient, HttpTransport, InMemoryTokenStore, TokenStore, TransportError,
};
use flockloop_domain::{ApiRequest, ApiResponse, HttpMethod, Session, TokenPair};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::Notify;

pub const PASSWORD: &str = "secret";

#[derive(Debug)]
struct BackendState {
    access_token: Option<String>,
    refresh_token: String,
    generation: u32,
    refresh_failure: Option<u16>,
    routes: HashMap<(HttpMethod, String), (u16, Value)>,
    always_unauthorized: Vec<String>,
}

/// Issues `T<n>`/`R<n>` token pairs and answers every other path with
/// 401 unless the bearer token is the current access token.
#[derive(Debug)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
    log: Mutex<Vec<ApiRequest>>,
    refresh_calls: AtomicUsize,
    refresh_gated: AtomicBool,
    refresh_gate: Notify,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(BackendState {
                access_token: Some("T1".to_string()),
                refresh_token: "R1".to_string(),
                generation: 1,
                refresh_failure: None,
                routes: HashMap::new(),
                always_unauthorized: Vec::new(),
            }),
            log: Mutex::new(Vec::new()),
            refresh_calls: AtomicUsize::new(0),
            refresh_gated: AtomicBool::new(false),
            refresh_gate: Notify::new(),
        })
    }

    /// Makes the current access token invalid.
    pub fn expire_access_token(&self) {
        self.state.lock().access_token = None;
    }

    /// Makes every refresh answer `status`.
    pub fn fail_refresh(&self, status: u16) {
        self.state.lock().refresh_failure = Some(status);
    }

    /// Holds every refresh until [`release_refresh`](Self::release_refresh).
    pub fn gate_refresh(&self) {
        self.refresh_gated.store(true, Ordering::SeqCst);
    }

    pub fn release_refresh(&self) {
        self.refresh_gated.store(false, Ordering::SeqCst);
        self.refresh_gate.notify_waiters();
        self.refresh_gate.notify_one();
    }

    /// Answers `method path` with `status` and `body` once authorized.
    pub fn route(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.state
            .lock()
            .routes
            .insert((method, path.to_string()), (status, body));
    }

    /// Answers `path` with 401 whatever the token.
    pub fn reject_always(&self, path: &str) {
        self.state.lock().always_unauthorized.push(path.to_string());
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().clone()
    }

    /// Bearer tokens sent to `path`, in send order.
    pub fn bearers_for(&self, path: &str) -> Vec<Option<String>> {
        self.log
            .lock()
            .iter()
            .filter(|request| request.path == path)
            .map(|request| request.bearer_token().map(str::to_string))
            .collect()
    }

    fn unauthorized(detail: &str) -> ApiResponse {
        ApiResponse::json(401, &json!({ "detail": detail }))
    }

    async fn refresh(&self, request: &ApiRequest) -> ApiResponse {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.refresh_gated.load(Ordering::SeqCst) {
            self.refresh_gate.notified().await;
        }

        let presented = request
            .body
            .as_deref()
            .and_then(|body| serde_json::from_slice::<Value>(body).ok())
            .and_then(|body| body["refresh_token"].as_str().map(str::to_string));

        let mut state = self.state.lock();
        if let Some(status) = state.refresh_failure {
            return ApiResponse::json(status, &json!({ "detail": "refresh unavailable" }));
        }
        if presented.as_deref() != Some(state.refresh_token.as_str()) {
            return Self::unauthorized("Invalid refresh token");
        }
        state.generation += 1;
        let access_token = format!("T{}", state.generation);
        let refresh_token = format!("R{}", state.generation);
        state.access_token = Some(access_token.clone());
        state.refresh_token.clone_from(&refresh_token);
        ApiResponse::json(
            200,
            &json!({
                "access_token": access_token,
                "refresh_token": refresh_token,
                "token_type": "bearer",
            }),
        )
    }

    fn login(&self, request: &ApiRequest) -> ApiResponse {
        let password = request
            .body
            .as_deref()
            .and_then(|body| serde_json::from_slice::<Value>(body).ok())
            .and_then(|body| body["password"].as_str().map(str::to_string));
        if password.as_deref() != Some(PASSWORD) {
            return Self::unauthorized("Incorrect email or password");
        }
        let mut state = self.state.lock();
        let access_token = format!("T{}", state.generation);
        state.access_token = Some(access_token.clone());
        ApiResponse::json(
            200,
            &json!({
                "access_token": access_token,
                "refresh_token": state.refresh_token,
                "token_type": "bearer",
            }),
        )
    }
}

#[async_trait]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.log.lock().push(request.clone());
        tokio::task::yield_now().await;

        if request.is_absolute() {
            return Ok(ApiResponse::empty(200));
        }
        match request.path.as_str() {
            "/auth/refresh" => return Ok(self.refresh(request).await),
            "/auth/login" => return Ok(self.login(request)),
            _ => {}
        }

        let state = self.state.lock();
        let authorized = state.access_token.is_some()
            && request.bearer_token() == state.access_token.as_deref()
            && !state.always_unauthorized.contains(&request.path);
        if !authorized {
            return Ok(Self::unauthorized("Could not validate credentials"));
        }
        let response = state
            .routes
            .get(&(request.method, request.path.clone()))
            .map_or_else(
                || ApiResponse::json(200, &json!({ "path": request.path })),
                |(status, body)| ApiResponse::json(*status, body),
            );
        Ok(response)
    }
}

/// A store holding `T1`/`R1`, as after a login.
pub fn signed_in_store() -> Arc<InMemoryTokenStore> {
    Arc::new(InMemoryTokenStore::with_session(Session::from_tokens(
        TokenPair::new("T1", "R1"),
    )))
}

pub fn authenticated(
    backend: &Arc<FakeBackend>,
    store: &Arc<InMemoryTokenStore>,
) -> AuthenticatedTransport {
    let raw: Arc<dyn HttpTransport> = backend.clone();
    let store: Arc<dyn TokenStore> = store.clone();
    AuthenticatedTransport::new(
        raw.clone(),
        store,
        Arc::new(HttpRefreshEndpoint::new(raw)),
    )
}

pub fn api_client(backend: &Arc<FakeBackend>, store: &Arc<InMemoryTokenStore>) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(Arc::new(authenticated(backend, store))))
}

/// Yields until `condition` holds.
pub async fn until(condition: impl Fn() -> bool) {
    while !condition() {
        tokio::task::yield_now().await;
    }
}

pub const SHORT: Duration = Duration::from_millis(50);
