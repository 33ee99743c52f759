//! Unified error type for tuiman.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::storage::StorageError;
use super::system::SystemError;
use super::transport::TransportError;
use super::validation::ValidationError;
use crate::traits::{EditorError, SecretError};

/// Unified error type.
///
/// Each domain error keeps its own variants; this enum only routes
/// categorization, codes and user messages.
#[derive(Debug)]
pub enum TuimanError {
    /// Request files, history database, export/import.
    Storage(StorageError),

    /// HTTP transport failure (no status obtained).
    Transport(TransportError),

    /// Secret store backend failure.
    Secret(SecretError),

    /// External editor failure.
    Editor(EditorError),

    /// User input rejected.
    Validation(ValidationError),

    /// System/filesystem errors.
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<TuimanError>,
        context: ErrorContext,
    },
}

impl TuimanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TuimanError::Storage(_) => ErrorCategory::Storage,
            TuimanError::Transport(err) => match err {
                TransportError::ClientInit { .. } => ErrorCategory::Configuration,
                TransportError::InvalidUrl { .. }
                | TransportError::InvalidMethod { .. }
                | TransportError::InvalidHeader { .. } => ErrorCategory::User,
                _ => ErrorCategory::Network,
            },
            TuimanError::Secret(_) => ErrorCategory::Secrets,
            TuimanError::Editor(_) => ErrorCategory::Editor,
            TuimanError::Validation(_) => ErrorCategory::User,
            TuimanError::System(SystemError::EnvironmentError { .. }) => {
                ErrorCategory::Configuration
            }
            TuimanError::System(_) => ErrorCategory::System,
            TuimanError::WithContext { error, .. } => error.category(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            TuimanError::Storage(err) => err.user_message(),
            TuimanError::Transport(err) => err.user_message(),
            TuimanError::Secret(err) => err.to_string(),
            TuimanError::Editor(err) => err.to_string(),
            TuimanError::Validation(err) => err.to_string(),
            TuimanError::System(err) => err.user_message(),
            TuimanError::WithContext { error, .. } => error.user_message(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TuimanError::Storage(err) => err.error_code(),
            TuimanError::Transport(err) => err.error_code(),
            TuimanError::Secret(_) => "E_SECRET",
            TuimanError::Editor(_) => "E_EDITOR",
            TuimanError::Validation(err) => err.error_code(),
            TuimanError::System(err) => err.error_code(),
            TuimanError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        TuimanError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            TuimanError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

}

impl fmt::Display for TuimanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuimanError::Storage(err) => write!(f, "{}", err),
            TuimanError::Transport(err) => write!(f, "{}", err),
            TuimanError::Secret(err) => write!(f, "{}", err),
            TuimanError::Editor(err) => write!(f, "{}", err),
            TuimanError::Validation(err) => write!(f, "{}", err),
            TuimanError::System(err) => write!(f, "{}", err),
            TuimanError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for TuimanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuimanError::Storage(err) => Some(err),
            TuimanError::Transport(err) => Some(err),
            TuimanError::Secret(err) => Some(err),
            TuimanError::Editor(err) => Some(err),
            TuimanError::Validation(err) => Some(err),
            TuimanError::System(err) => Some(err),
            TuimanError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<StorageError> for TuimanError {
    fn from(err: StorageError) -> Self {
        TuimanError::Storage(err)
    }
}

impl From<TransportError> for TuimanError {
    fn from(err: TransportError) -> Self {
        TuimanError::Transport(err)
    }
}

impl From<SecretError> for TuimanError {
    fn from(err: SecretError) -> Self {
        TuimanError::Secret(err)
    }
}

impl From<EditorError> for TuimanError {
    fn from(err: EditorError) -> Self {
        TuimanError::Editor(err)
    }
}

impl From<ValidationError> for TuimanError {
    fn from(err: ValidationError) -> Self {
        TuimanError::Validation(err)
    }
}

impl From<SystemError> for TuimanError {
    fn from(err: SystemError) -> Self {
        TuimanError::System(err)
    }
}

// ============================================================================
// From implementations for external error types
// ============================================================================

impl From<std::io::Error> for TuimanError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        TuimanError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for TuimanError {
    fn from(err: serde_json::Error) -> Self {
        TuimanError::Storage(err.into())
    }
}

impl From<rusqlite::Error> for TuimanError {
    fn from(err: rusqlite::Error) -> Self {
        TuimanError::Storage(err.into())
    }
}
