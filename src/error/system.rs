//! System-related error types.
//!
//! Filesystem access, directory discovery and environment problems.

use std::fmt;
use std::path::PathBuf;

/// System-specific error variants.
#[derive(Debug, Clone)]
pub enum SystemError {
    /// Permission denied for file/directory operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Failed to create directory.
    DirectoryCreationFailed { path: PathBuf, message: String },

    /// Generic I/O error.
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Could not determine home directory.
    NoHomeDirectory,

    /// Environment variable set to an unusable value.
    EnvironmentError { variable: String, message: String },
}

impl SystemError {
    pub fn user_message(&self) -> String {
        match self {
            SystemError::PermissionDenied { path, operation } => {
                format!(
                    "Permission denied: cannot {} '{}'",
                    operation,
                    path.display()
                )
            }
            SystemError::DirectoryCreationFailed { path, .. } => {
                format!("Failed to create directory: '{}'", path.display())
            }
            SystemError::IoError {
                operation, path, ..
            } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            SystemError::NoHomeDirectory => {
                "Could not determine your home directory. Set HOME.".to_string()
            }
            SystemError::EnvironmentError { variable, message } => {
                format!("Environment variable '{}' error: {}", variable, message)
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::DirectoryCreationFailed { .. } => "E_SYS_DIR_CREATE",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::NoHomeDirectory => "E_SYS_NO_HOME",
            SystemError::EnvironmentError { .. } => "E_SYS_ENV",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied: {} '{}'", operation, path.display())
            }
            SystemError::DirectoryCreationFailed { path, message } => {
                write!(
                    f,
                    "Failed to create directory '{}': {}",
                    path.display(),
                    message
                )
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(
                    f,
                    "I/O error during {} at '{}': {}",
                    operation,
                    p.display(),
                    message
                ),
                None => write!(f, "I/O error during {}: {}", operation, message),
            },
            SystemError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            SystemError::EnvironmentError { variable, message } => {
                write!(f, "Environment variable '{}' error: {}", variable, message)
            }
        }
    }
}

impl std::error::Error for SystemError {}

/// Classify an I/O error into a SystemError.
pub fn classify_io_error(
    err: std::io::Error,
    path: Option<PathBuf>,
    operation: &str,
) -> SystemError {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::PermissionDenied => match path {
            Some(p) => SystemError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            None => SystemError::IoError {
                operation: operation.to_string(),
                path: None,
                message: "Permission denied".to_string(),
            },
        },
        _ => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}
