//! Authenticated request pipeline.
//!
//! This module provides:
//! - In-memory session storage with change events
//! - The single-flight refresh coordinator
//! - The bearer-authenticating transport that recovers from 401s
//! - A refresh endpoint calling the backend directly

mod coordinator;
mod policy;
mod refresh_endpoint;
mod token_store;
mod transport;

pub use coordinator::{PendingRefresh, RefreshCoordinator, RefreshLease, RefreshTicket};
pub use policy::{LOGIN_PATH, REFRESH_PATH, RecoveryPolicy};
pub use refresh_endpoint::HttpRefreshEndpoint;
pub use token_store::{InMemoryTokenStore, SessionEvent};
pub use transport::{Attempt, AuthenticatedTransport};
