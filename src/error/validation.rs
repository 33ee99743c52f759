//! Input validation errors raised by the screens.
//!
//! Every variant renders directly as a status line, so `Display` yields the
//! exact text shown to the user.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Save attempted with an empty URL.
    EmptyUrl,

    /// Body looked like JSON but did not parse.
    InvalidJson { message: String },

    /// `:secret` issued while the draft has no secret reference.
    MissingSecretRef,

    /// A command was invoked without its required argument.
    Usage { usage: &'static str },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::EmptyUrl => "E_VAL_EMPTY_URL",
            ValidationError::InvalidJson { .. } => "E_VAL_JSON",
            ValidationError::MissingSecretRef => "E_VAL_SECRET_REF",
            ValidationError::Usage { .. } => "E_VAL_USAGE",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyUrl => write!(f, "URL cannot be empty"),
            ValidationError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            ValidationError::MissingSecretRef => write!(f, "Set Secret Ref first"),
            ValidationError::Usage { usage } => write!(f, "Usage: {}", usage),
        }
    }
}

impl std::error::Error for ValidationError {}
