//! Preflight: build every collaborator the UI needs before the terminal is
//! touched.
//!
//! Any failure here is fatal. `main` prints the error and exits 1.

use std::sync::Arc;

use tracing::info;

use super::config::{AppConfig, SecretBackend};
use super::paths::AppPaths;
use crate::adapters::{FileSecretStore, KeyringSecretStore, ProcessEditor, ReqwestTransport};
use crate::app::Services;
use crate::error::{ErrorCategory, ErrorContext, ResultExt, StorageError, TransportError, TuimanError};
use crate::storage::{HistoryLog, RequestStore};
use crate::traits::SecretStore;

/// Error type for preflight checks.
#[derive(Debug)]
pub enum PreflightError {
    /// Data directories could not be resolved or created
    Paths(TuimanError),
    /// History database could not be opened or migrated
    HistoryLog(StorageError),
    /// HTTP client could not be built
    Transport(TransportError),
}

impl PreflightError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PreflightError::Paths(e) => e.category(),
            PreflightError::HistoryLog(_) => ErrorCategory::Storage,
            PreflightError::Transport(_) => ErrorCategory::Configuration,
        }
    }
}

impl std::fmt::Display for PreflightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreflightError::Paths(e) => write!(f, "failed to initialize paths: {}", e),
            PreflightError::HistoryLog(e) => write!(f, "failed to open history db: {}", e),
            PreflightError::Transport(e) => write!(f, "failed to initialize http client: {}", e),
        }
    }
}

impl std::error::Error for PreflightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreflightError::Paths(e) => Some(e),
            PreflightError::HistoryLog(e) => Some(e),
            PreflightError::Transport(e) => Some(e),
        }
    }
}

/// Everything `main` needs to start the UI.
#[derive(Debug)]
pub struct StartupResult {
    pub paths: AppPaths,
    pub services: Services,
}

/// Resolve and create the data directories.
pub fn prepare_paths(config: &AppConfig) -> Result<AppPaths, PreflightError> {
    let paths = AppPaths::discover(config)
        .context(ErrorContext::new("discover paths").with_component("startup"))
        .map_err(PreflightError::Paths)?;
    paths
        .ensure()
        .context(ErrorContext::new("create directories").with_component("startup"))
        .map_err(PreflightError::Paths)?;
    Ok(paths)
}

/// Secret store for the configured backend.
pub fn build_secret_store(backend: SecretBackend, paths: &AppPaths) -> Arc<dyn SecretStore> {
    match backend {
        SecretBackend::Keyring => Arc::new(KeyringSecretStore::new()),
        SecretBackend::File => Arc::new(FileSecretStore::new(paths.secrets_file.clone())),
    }
}

/// Build the services the UI runs on.
///
/// 1. Resolve and create the data directories
/// 2. Open (and migrate) the history database
/// 3. Pick the secret store backend
/// 4. Build the HTTP transport and the external editor
pub fn run_preflight(config: &AppConfig) -> Result<StartupResult, PreflightError> {
    let paths = prepare_paths(config)?;
    let services = build_services(config, &paths)?;
    Ok(StartupResult { paths, services })
}

/// Services on already-prepared paths.
pub fn build_services(config: &AppConfig, paths: &AppPaths) -> Result<Services, PreflightError> {
    let history = HistoryLog::open(&paths.history_db).map_err(PreflightError::HistoryLog)?;
    let secrets = build_secret_store(config.secret_backend, paths);
    let transport = ReqwestTransport::new(
        Arc::clone(&secrets),
        config.http_timeout_secs,
        config.max_response_bytes,
    )
    .map_err(PreflightError::Transport)?;

    info!(
        "Preflight complete: requests in {}, secrets in {}",
        paths.requests_dir.display(),
        secrets.backend_name()
    );

    Ok(Services {
        requests: RequestStore::new(paths.requests_dir.clone()),
        history,
        transport: Arc::new(transport),
        secrets,
        editor: Box::new(ProcessEditor::new(config.editor_command.clone())),
        history_limit: config.history_limit,
    })
}
