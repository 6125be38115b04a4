//! Session and credential types.
//!
//! The credential is the identity tuple established at login and persisted
//! on device; the session state is its in-memory projection plus the
//! derived authentication flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(pub String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

/// The persisted identity tuple established at login.
///
/// The wire payload names the user id `_id`; the serde rename keeps the
/// struct deserializable directly from a login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub role: Role,
    #[serde(rename = "_id")]
    pub user_id: String,
    pub name: String,
}

/// In-memory projection of the credential plus the derived
/// authentication flag.
///
/// Invariant: `is_authenticated` is true iff `token` and `user_id` are
/// non-empty and `role` is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub token: String,
    pub role: Option<Role>,
    pub user_id: String,
    pub name: String,
    pub is_authenticated: bool,
}

impl SessionState {
    /// Overwrite every field from a credential. Used both for the startup
    /// hydrate and for post-login set-credentials; the two transitions are
    /// identical.
    pub fn set_credentials(&mut self, credential: Credential) {
        self.token = credential.token;
        self.role = Some(credential.role);
        self.user_id = credential.user_id;
        self.name = credential.name;
        self.is_authenticated = !self.token.is_empty() && !self.user_id.is_empty();
    }

    /// Reset to the logged-out state. Clears every field that login sets,
    /// `role` and `name` included.
    pub fn clear_credentials(&mut self) {
        *self = SessionState::default();
    }

    /// Build a session directly from an optional credential, as read back
    /// from the persisted store. `None` yields the empty session.
    pub fn from_credential(credential: Option<Credential>) -> Self {
        let mut state = SessionState::default();
        if let Some(credential) = credential {
            state.set_credentials(credential);
        }
        state
    }
}
