//! Error category classification.
//!
//! Every failure carries a category. The screens log it next to the error
//! code, and startup failures print its description and recovery hint.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (DNS, connect, timeout, TLS).
    Network,

    /// Request files, history database, export/import.
    Storage,

    /// Secret store backends (keyring, secrets file).
    Secrets,

    /// External editor could not run or exited unsuccessfully.
    Editor,

    /// Invalid input the user can fix (empty URL, malformed JSON).
    User,

    /// OS-level problems (filesystem, permissions, environment).
    System,

    /// Invalid or missing configuration.
    Configuration,
}

impl ErrorCategory {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Secrets => "secrets",
            ErrorCategory::Editor => "editor",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// User-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network problem",
            ErrorCategory::Storage => "Storage problem",
            ErrorCategory::Secrets => "Secret store problem",
            ErrorCategory::Editor => "External editor problem",
            ErrorCategory::User => "Invalid input",
            ErrorCategory::System => "System error",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Suggested recovery action for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check the URL and your connection, then send again",
            ErrorCategory::Storage => "Check permissions of the tuiman config and state directories",
            ErrorCategory::Secrets => "Set TUIMAN_SECRET_BACKEND=file if no keyring is available",
            ErrorCategory::Editor => "Set $VISUAL or $EDITOR to a working editor",
            ErrorCategory::User => "Fix the highlighted field and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check the TUIMAN_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
