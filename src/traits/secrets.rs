//! Secret store trait abstraction.
//!
//! Requests only carry a secret *reference*; the value lives in a store
//! behind this trait and is looked up when a request is sent.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("no secret stored for '{reference}'")]
    NotFound { reference: String },

    #[error("secret reference is empty")]
    EmptyReference,

    #[error("{backend} error: {message}")]
    Backend { backend: String, message: String },
}

/// Storage for secret values keyed by reference.
pub trait SecretStore: Send + Sync {
    /// Store `value` under `reference`, replacing any previous value.
    fn set(&self, reference: &str, value: &str) -> Result<(), SecretError>;

    fn get(&self, reference: &str) -> Result<String, SecretError>;

    /// Remove a secret. Removing a missing secret is not an error.
    fn delete(&self, reference: &str) -> Result<(), SecretError>;

    /// Human-readable backend name used in status lines.
    fn backend_name(&self) -> &'static str;
}
