//! Domain logic independent of the terminal.
//!
//! - [`auth`] - Applies the custom header and auth settings to a request
//! - [`body`] - Body edit rule (JSON validation and pretty-printing)
//! - [`filter`] - Filtered request list with bounded selection

pub mod auth;
pub mod body;
pub mod filter;

pub use auth::{append_query_param, prepare_request, PreparedRequest, DEFAULT_API_KEY_NAME};
pub use body::{apply_body_edit, looks_like_json, BodyEdit};
pub use filter::{matches_filter, FilterIndex};
