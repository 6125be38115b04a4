//! Persisted credential store.
//!
//! One file per key under the configured directory, mirroring the four
//! independent entries the product persists on device. There is no
//! atomicity across keys: a crash between writes can leave a partial
//! credential, and the hydrate path tolerates that by degrading to the
//! logged-out state.

use fieldforce_core::{Credential, Role};
use std::path::PathBuf;
use tracing::warn;

/// The exact keys the store is used for.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const ROLE: &str = "role";
    pub const USER_ID: &str = "userId";
    pub const NAME: &str = "name";

    /// Every key login sets. Logout removes all of them.
    pub const ALL: [&str; 4] = [TOKEN, ROLE, USER_ID, NAME];
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-device key-value store holding the credential entries.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read one entry. Absent keys are `None`, not an error.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write one entry, creating the directory on first use.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    /// Remove the given entries. Already-absent keys are skipped.
    pub fn remove_keys(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            match std::fs::remove_file(self.key_path(key)) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Persist every part of a credential. Four independent writes, in
    /// the order login performs them.
    pub fn write_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        self.set(keys::TOKEN, &credential.token)?;
        self.set(keys::ROLE, credential.role.as_str())?;
        self.set(keys::USER_ID, &credential.user_id)?;
        self.set(keys::NAME, &credential.name)?;
        Ok(())
    }

    /// Assemble a credential from the persisted entries.
    ///
    /// Returns `None` when `token`, `role` or `userId` is missing, empty,
    /// or unparseable (a partial write from an interrupted login). A
    /// missing `name` alone does not block hydration.
    pub fn read_credential(&self) -> Result<Option<Credential>, StoreError> {
        let token = match self.get(keys::TOKEN)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let role = match self.get(keys::ROLE)? {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => role,
                Err(err) => {
                    warn!(%err, "persisted role is unparseable, treating as logged out");
                    return Ok(None);
                }
            },
            None => return Ok(None),
        };
        let user_id = match self.get(keys::USER_ID)? {
            Some(user_id) if !user_id.is_empty() => user_id,
            _ => return Ok(None),
        };
        let name = self.get(keys::NAME)?.unwrap_or_default();
        Ok(Some(Credential {
            token,
            role,
            user_id,
            name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, CredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path());
        (dir, store)
    }

    fn credential() -> Credential {
        Credential {
            token: "tok".to_string(),
            role: Role::Manager,
            user_id: "u1".to_string(),
            name: "Meera".to_string(),
        }
    }

    #[test]
    fn get_on_missing_key_is_none() {
        let (_dir, store) = store();
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = store();
        store.set(keys::TOKEN, "abc").unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn write_then_read_credential() {
        let (_dir, store) = store();
        store.write_credential(&credential()).unwrap();
        assert_eq!(store.read_credential().unwrap(), Some(credential()));
    }

    #[test]
    fn partial_credential_reads_as_logged_out() {
        let (_dir, store) = store();
        store.set(keys::TOKEN, "tok").unwrap();
        store.set(keys::USER_ID, "u1").unwrap();
        // role never written
        assert_eq!(store.read_credential().unwrap(), None);
    }

    #[test]
    fn missing_name_does_not_block_hydration() {
        let (_dir, store) = store();
        store.write_credential(&credential()).unwrap();
        store.remove_keys(&[keys::NAME]).unwrap();
        let cred = store.read_credential().unwrap().unwrap();
        assert_eq!(cred.name, "");
    }

    #[test]
    fn remove_keys_tolerates_absent_entries() {
        let (_dir, store) = store();
        store.set(keys::TOKEN, "tok").unwrap();
        store.remove_keys(&keys::ALL).unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);
    }
}
