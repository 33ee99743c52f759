//! Application configuration.
//!
//! Configuration comes from defaults overridden by `TUIMAN_*` environment
//! variables. There is no config file.

use std::path::PathBuf;

use crate::error::{SystemError, TuimanResult};

/// Default HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default number of runs loaded into the history screen.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Default cap on response bodies kept in memory and in the history log.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;

/// Which secret store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretBackend {
    /// The platform credential store through the `keyring` crate.
    Keyring,
    /// A JSON map in the config directory, readable by the owner only.
    File,
}

impl SecretBackend {
    /// Keyring where a native store always exists, the secrets file elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            SecretBackend::Keyring
        } else {
            SecretBackend::File
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keyring" | "keychain" => Some(SecretBackend::Keyring),
            "file" => Some(SecretBackend::File),
            _ => None,
        }
    }
}

/// Runtime configuration.
///
/// # Example
///
/// ```ignore
/// use tuiman::startup::AppConfig;
///
/// let config = AppConfig::default()
///     .with_http_timeout_secs(5)
///     .with_secret_backend(SecretBackend::File);
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Override for `~/.config/tuiman`
    pub config_dir: Option<PathBuf>,
    /// Override for `~/.local/state/tuiman`
    pub state_dir: Option<PathBuf>,
    /// Override for `~/.cache/tuiman`
    pub cache_dir: Option<PathBuf>,
    pub secret_backend: SecretBackend,
    pub http_timeout_secs: u64,
    pub history_limit: usize,
    pub max_response_bytes: usize,
    /// Editor command taking precedence over $VISUAL and $EDITOR
    pub editor_command: Option<String>,
    /// `tracing_subscriber` filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_dir: None,
            state_dir: None,
            cache_dir: None,
            secret_backend: SecretBackend::platform_default(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            editor_command: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> TuimanResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `TUIMAN_*` key.
    pub fn from_lookup<F>(lookup: F) -> TuimanResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("TUIMAN_CONFIG_DIR") {
            config.config_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = get("TUIMAN_STATE_DIR") {
            config.state_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = get("TUIMAN_CACHE_DIR") {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = get("TUIMAN_SECRET_BACKEND") {
            config.secret_backend =
                SecretBackend::parse(&value).ok_or_else(|| SystemError::EnvironmentError {
                    variable: "TUIMAN_SECRET_BACKEND".to_string(),
                    message: format!("expected 'keyring' or 'file', got '{}'", value),
                })?;
        }
        if let Some(value) = get("TUIMAN_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_positive("TUIMAN_HTTP_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = get("TUIMAN_HISTORY_LIMIT") {
            config.history_limit = parse_positive("TUIMAN_HISTORY_LIMIT", &value)? as usize;
        }
        if let Some(value) = get("TUIMAN_EDITOR") {
            config.editor_command = Some(value);
        }
        if let Some(value) = get("TUIMAN_LOG") {
            config.log_filter = value;
        }

        Ok(config)
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn with_secret_backend(mut self, backend: SecretBackend) -> Self {
        self.secret_backend = backend;
        self
    }

    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_max_response_bytes(mut self, bytes: usize) -> Self {
        self.max_response_bytes = bytes;
        self
    }

    pub fn with_editor_command(mut self, command: impl Into<String>) -> Self {
        self.editor_command = Some(command.into());
        self
    }
}

fn parse_positive(variable: &str, value: &str) -> TuimanResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SystemError::EnvironmentError {
            variable: variable.to_string(),
            message: format!("expected a positive integer, got '{}'", value),
        }
        .into()),
    }
}
