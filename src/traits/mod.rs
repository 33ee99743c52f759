//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`Transport`] - Sends a request over HTTP
//! - [`SecretStore`] - Secret values keyed by reference
//! - [`ExternalEditor`] - Edits text in `$VISUAL`/`$EDITOR`

pub mod editor;
pub mod secrets;
pub mod transport;

pub use editor::{EditorError, ExternalEditor};
pub use secrets::{SecretError, SecretStore};
pub use transport::{Exchange, Transport};
