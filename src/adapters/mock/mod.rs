//! Test doubles for every collaborator trait.
//!
//! - [`MockTransport`] - Scripted exchanges, records what was sent
//! - [`InMemorySecretStore`] - Secrets in a map, with failure toggles
//! - [`MockEditor`] - Scripted edit results, records what was edited

pub mod editor;
pub mod secrets;
pub mod transport;

pub use editor::{EditCall, MockEditor};
pub use secrets::InMemorySecretStore;
pub use transport::MockTransport;
