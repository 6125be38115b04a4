//! Fieldforce Core - Data Types
//!
//! Pure data structures with no behavior beyond constructors and pure
//! transition functions. The client crate depends on this; nothing here
//! performs I/O.

pub mod cache;
pub mod failure;
pub mod reachability;
pub mod session;
pub mod types;

pub use cache::{CacheKey, CacheTag};
pub use failure::{classify, friendly_message, ApiFailure, ErrorAction};
pub use reachability::{ProbeOutcome, ServerStatus};
pub use session::{Credential, Role, RoleParseError, SessionState};
pub use types::*;
