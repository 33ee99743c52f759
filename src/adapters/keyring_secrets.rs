//! Platform keyring secret store (macOS Keychain, Windows Credential Manager,
//! Secret Service on Linux).

use keyring::Entry;

use crate::traits::{SecretError, SecretStore};

/// Keyring service name every secret is filed under.
pub const KEYRING_SERVICE: &str = "tuiman";

const BACKEND: &str = "keyring";

#[derive(Debug, Clone)]
pub struct KeyringSecretStore {
    service: String,
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringSecretStore {
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, reference: &str) -> Result<Entry, SecretError> {
        if reference.is_empty() {
            return Err(SecretError::EmptyReference);
        }
        Entry::new(&self.service, reference).map_err(backend_error)
    }
}

fn backend_error(err: keyring::Error) -> SecretError {
    SecretError::Backend {
        backend: BACKEND.to_string(),
        message: err.to_string(),
    }
}

impl SecretStore for KeyringSecretStore {
    fn set(&self, reference: &str, value: &str) -> Result<(), SecretError> {
        self.entry(reference)?
            .set_password(value)
            .map_err(backend_error)
    }

    fn get(&self, reference: &str) -> Result<String, SecretError> {
        match self.entry(reference)?.get_password() {
            Ok(value) => Ok(value),
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound {
                reference: reference.to_string(),
            }),
            Err(e) => Err(backend_error(e)),
        }
    }

    fn delete(&self, reference: &str) -> Result<(), SecretError> {
        match self.entry(reference)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(backend_error(e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reference_rejected() {
        let store = KeyringSecretStore::new();
        assert_eq!(store.get(""), Err(SecretError::EmptyReference));
        assert_eq!(store.set("", "v"), Err(SecretError::EmptyReference));
        assert_eq!(store.backend_name(), "keyring");
    }
}
