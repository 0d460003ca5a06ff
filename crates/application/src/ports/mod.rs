//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_transport;
mod refresh_endpoint;
mod token_store;

pub use http_transport::HttpTransport;
pub use refresh_endpoint::RefreshEndpoint;
pub use token_store::TokenStore;
