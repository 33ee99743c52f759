//! In-memory secret store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::traits::{SecretError, SecretStore};

/// Secret store backed by a shared map.
///
/// Clones share state, so a test can keep one handle while the app owns
/// another.
///
/// # Example
///
/// ```ignore
/// use tuiman::adapters::mock::InMemorySecretStore;
/// use tuiman::traits::SecretStore;
///
/// let store = InMemorySecretStore::new();
/// store.insert("token", "abc");
/// assert_eq!(store.get("token")?, "abc");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretStore {
    secrets: Arc<Mutex<HashMap<String, String>>>,
    fail_set: Arc<Mutex<bool>>,
    fail_get: Arc<Mutex<bool>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a secret without going through [`SecretStore::set`].
    pub fn insert(&self, reference: &str, value: &str) {
        self.secrets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(reference.to_string(), value.to_string());
    }

    /// Current value, bypassing failure toggles.
    pub fn value(&self, reference: &str) -> Option<String> {
        self.secrets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(reference)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.secrets.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every `set` fail with a backend error.
    pub fn set_fail_set(&self, fail: bool) {
        *self.fail_set.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    /// Make every `get` fail with a backend error.
    pub fn set_fail_get(&self, fail: bool) {
        *self.fail_get.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }

    fn injected(flag: &Mutex<bool>, op: &str) -> Result<(), SecretError> {
        if *flag.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(SecretError::Backend {
                backend: "memory".to_string(),
                message: format!("injected {} failure", op),
            });
        }
        Ok(())
    }
}

impl SecretStore for InMemorySecretStore {
    fn set(&self, reference: &str, value: &str) -> Result<(), SecretError> {
        if reference.is_empty() {
            return Err(SecretError::EmptyReference);
        }
        Self::injected(&self.fail_set, "set")?;
        self.insert(reference, value);
        Ok(())
    }

    fn get(&self, reference: &str) -> Result<String, SecretError> {
        if reference.is_empty() {
            return Err(SecretError::EmptyReference);
        }
        Self::injected(&self.fail_get, "get")?;
        self.value(reference).ok_or_else(|| SecretError::NotFound {
            reference: reference.to_string(),
        })
    }

    fn delete(&self, reference: &str) -> Result<(), SecretError> {
        self.secrets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(reference);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
