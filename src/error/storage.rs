//! Storage error types: request files, history database, export/import.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum StorageError {
    /// No request file exists for this id.
    RequestNotFound { id: String },

    /// Id cannot name a file inside the request directory.
    InvalidId { id: String },

    /// A request file exists but does not contain a valid request.
    Corrupt { path: PathBuf, message: String },

    /// Serializing a value to JSON failed.
    Serialize { message: String },

    /// File or directory operation failed.
    Io {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// SQLite history database error.
    Database { message: String },

    /// Import source directory has no `requests/` folder.
    MissingImportDirectory { path: PathBuf },
}

impl StorageError {
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        StorageError::Io {
            operation: operation.into(),
            path: Some(path.into()),
            message: err.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            StorageError::RequestNotFound { id } => format!("Request '{}' not found", id),
            StorageError::InvalidId { id } => format!("Invalid request id '{}'", id),
            StorageError::Corrupt { path, .. } => {
                format!("Request file '{}' is not valid JSON", path.display())
            }
            StorageError::Serialize { .. } => "Could not encode request".to_string(),
            StorageError::Io {
                operation, path, ..
            } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            StorageError::Database { .. } => "History database error".to_string(),
            StorageError::MissingImportDirectory { path } => {
                format!("No requests directory at '{}'", path.display())
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::RequestNotFound { .. } => "E_STORE_NOT_FOUND",
            StorageError::InvalidId { .. } => "E_STORE_BAD_ID",
            StorageError::Corrupt { .. } => "E_STORE_CORRUPT",
            StorageError::Serialize { .. } => "E_STORE_SERIALIZE",
            StorageError::Io { .. } => "E_STORE_IO",
            StorageError::Database { .. } => "E_STORE_DB",
            StorageError::MissingImportDirectory { .. } => "E_STORE_IMPORT_DIR",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::RequestNotFound { id } => write!(f, "request not found: {}", id),
            StorageError::InvalidId { id } => write!(f, "invalid request id: {:?}", id),
            StorageError::Corrupt { path, message } => {
                write!(f, "corrupt request file '{}': {}", path.display(), message)
            }
            StorageError::Serialize { message } => write!(f, "serialize failed: {}", message),
            StorageError::Io {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(f, "{} '{}': {}", operation, p.display(), message),
                None => write!(f, "{}: {}", operation, message),
            },
            StorageError::Database { message } => write!(f, "database error: {}", message),
            StorageError::MissingImportDirectory { path } => {
                write!(f, "missing import directory '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialize {
            message: err.to_string(),
        }
    }
}
