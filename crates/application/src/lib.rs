//! Flockloop Application - Use cases and ports
//!
//! This crate contains the authenticated request pipeline, the typed API
//! client and the use cases built on it. It depends only on the domain
//! crate and defines ports (traits) for external dependencies.

pub mod api;
pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use api::ApiClient;
pub use auth::{AuthenticatedTransport, InMemoryTokenStore, RefreshCoordinator, SessionEvent};
pub use error::{ApiError, ApiResult, TransportError};
pub use ports::{HttpTransport, RefreshEndpoint, TokenStore};
