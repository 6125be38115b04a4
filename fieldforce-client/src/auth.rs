//! Authentication flows: hydrate, login, logout.
//!
//! The session manager owns the in-memory session state and coordinates
//! the credential store, the API client, and the request cache so the
//! three never disagree about who is logged in.

use crate::cached::CachedClient;
use crate::error::ClientError;
use crate::store::{keys, CredentialStore};
use fieldforce_core::types::LoginRequest;
use fieldforce_core::{Credential, SessionState};
use tracing::{info, warn};

/// Literal suffix gating the admin login flow. A convention enforced
/// client-side, stripped before transmission; the server never sees it.
pub const ADMIN_SUFFIX: &str = "@admin";

/// Validate the admin-password convention and return the password to
/// actually transmit.
pub fn admin_password(password: &str) -> Result<&str, ClientError> {
    password
        .strip_suffix(ADMIN_SUFFIX)
        .ok_or_else(|| ClientError::Validation {
            field: "password",
            reason: format!("admin access requires a password ending with {}", ADMIN_SUFFIX),
        })
}

pub struct SessionManager {
    store: CredentialStore,
    client: CachedClient,
    session: SessionState,
}

impl SessionManager {
    pub fn new(store: CredentialStore, client: CachedClient) -> Self {
        Self {
            store,
            client,
            session: SessionState::default(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn client(&self) -> &CachedClient {
        &self.client
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Populate the session from the persisted credential at startup.
    /// A store read failure degrades to the logged-out state rather than
    /// propagating.
    pub fn hydrate(&mut self) -> &SessionState {
        let credential = match self.store.read_credential() {
            Ok(credential) => credential,
            Err(err) => {
                warn!(%err, "credential store unreadable, starting logged out");
                None
            }
        };
        self.session = SessionState::from_credential(credential);
        &self.session
    }

    /// Employee login: POST to `/employee/login`, then persist all four
    /// credential entries and set the in-memory session.
    pub async fn login_employee(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Credential, ClientError> {
        require_fields(email, password)?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.api().employee_login(&request).await?;
        self.complete_login(response.success, response.message, response.data)
    }

    /// Admin login: the submitted password must end with `@admin`; the
    /// suffix is rejected client-side when absent (no request is sent)
    /// and stripped before transmission.
    pub async fn login_admin(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Credential, ClientError> {
        require_fields(email, password)?;
        let password = admin_password(password)?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.api().admin_login(&request).await?;
        self.complete_login(response.success, response.message, response.data)
    }

    fn complete_login(
        &mut self,
        success: bool,
        message: Option<String>,
        credential: Credential,
    ) -> Result<Credential, ClientError> {
        if !success {
            return Err(ClientError::LoginRejected {
                message: message.unwrap_or_else(|| "Invalid credentials".to_string()),
            });
        }
        self.store.write_credential(&credential)?;
        self.session.set_credentials(credential.clone());
        info!(role = %credential.role, "login succeeded");
        Ok(credential)
    }

    /// Logout: remove every persisted credential entry, clear the session,
    /// and drop the request cache wholesale.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.store.remove_keys(&keys::ALL)?;
        self.session.clear_credentials();
        self.client.reset_cache().await;
        info!("logged out");
        Ok(())
    }
}

fn require_fields(email: &str, password: &str) -> Result<(), ClientError> {
    if email.trim().is_empty() {
        return Err(ClientError::Validation {
            field: "email",
            reason: "must not be empty".to_string(),
        });
    }
    if password.is_empty() {
        return Err(ClientError::Validation {
            field: "password",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_password_strips_suffix() {
        assert_eq!(admin_password("secret@admin").unwrap(), "secret");
    }

    #[test]
    fn admin_password_without_suffix_is_rejected() {
        let err = admin_password("secret").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation { field: "password", .. }
        ));
    }

    #[test]
    fn suffix_must_be_at_the_end() {
        assert!(admin_password("@adminsecret").is_err());
        assert_eq!(admin_password("@admin").unwrap(), "");
    }
}
