//! Fieldforce client SDK.
//!
//! Session lifecycle for the fieldforce API: persisted credentials,
//! authorized requests, a tag-indexed query cache, and a server
//! reachability monitor. Pure data types live in `fieldforce-core`;
//! everything here performs I/O.

pub mod api;
pub mod auth;
pub mod cache;
pub mod cached;
pub mod config;
pub mod error;
pub mod reachability;
pub mod store;

pub use api::ApiClient;
pub use auth::{admin_password, SessionManager, ADMIN_SUFFIX};
pub use cache::QueryCache;
pub use cached::CachedClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use reachability::ReachabilityMonitor;
pub use store::{keys, CredentialStore, StoreError};
