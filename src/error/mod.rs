//! Unified error handling for tuiman.
//!
//! - **Error Categories**: high-level classification logged with every
//!   failure and printed with a recovery hint when startup fails
//! - **Domain-specific Errors**: storage, transport, validation and system
//!   errors (secret store and editor errors live next to their traits)
//! - **Unified Error Type**: `TuimanError` consolidates all of them
//! - **Result Type Alias**: `TuimanResult<T>` with [`ResultExt`] for context
//!
//! Screens hand failures to `App::report_error` (the error's own message
//! becomes the status line) or `App::report_failure` (a fixed status line,
//! details in the log). User-category errors are logged at debug level,
//! the rest as warnings with their context.

mod category;
mod context;
mod result;
mod storage;
mod system;
mod transport;
mod tuiman_error;
mod validation;

pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use result::{ResultExt, TuimanResult};
pub use storage::StorageError;
pub use system::{classify_io_error, SystemError};
pub use transport::{classify_reqwest_error, TransportError};
pub use tuiman_error::TuimanError;
pub use validation::ValidationError;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::traits::{EditorError, SecretError};

    #[test]
    fn test_error_unification() {
        let errors: Vec<TuimanError> = vec![
            StorageError::Database {
                message: "locked".into(),
            }
            .into(),
            TransportError::ConnectionFailed {
                url: "http://localhost:1".into(),
                message: "refused".into(),
            }
            .into(),
            SecretError::NotFound {
                reference: "token".into(),
            }
            .into(),
            EditorError::NonZeroExit { code: Some(1) }.into(),
            ValidationError::EmptyUrl.into(),
            SystemError::NoHomeDirectory.into(),
        ];

        let categories: Vec<ErrorCategory> = errors.iter().map(|e| e.category()).collect();
        assert_eq!(
            categories,
            vec![
                ErrorCategory::Storage,
                ErrorCategory::Network,
                ErrorCategory::Secrets,
                ErrorCategory::Editor,
                ErrorCategory::User,
                ErrorCategory::System,
            ]
        );

        for err in &errors {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }
}
