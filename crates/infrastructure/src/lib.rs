//! Flockloop Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading
//! and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::ReqwestTransport;
pub use config::{ClientConfig, ConfigError};
pub use persistence::{FileTokenStore, SessionFileError};
