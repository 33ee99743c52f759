//! Concrete implementations of the collaborator traits in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestTransport`] - HTTP via reqwest
//! - [`KeyringSecretStore`] - Platform keyring
//! - [`FileSecretStore`] - JSON file with private permissions
//! - [`ProcessEditor`] - `$VISUAL`/`$EDITOR` on a temp file
//!
//! The [`mock`] submodule provides test doubles for each trait.

pub mod file_secrets;
pub mod keyring_secrets;
pub mod mock;
pub mod process_editor;
pub mod reqwest_transport;

pub use file_secrets::FileSecretStore;
pub use keyring_secrets::{KeyringSecretStore, KEYRING_SERVICE};
pub use mock::{InMemorySecretStore, MockEditor, MockTransport};
pub use process_editor::{resolve_editor_command, ProcessEditor};
pub use reqwest_transport::{truncation_marker, ReqwestTransport};
