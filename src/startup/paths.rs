//! Filesystem locations.
//!
//! Layout under the user's home directory:
//!
//! ```text
//! ~/.config/tuiman/            config dir
//! ~/.config/tuiman/requests/   one JSON file per request
//! ~/.config/tuiman/secrets.json  file secret backend
//! ~/.local/state/tuiman/       state dir
//! ~/.local/state/tuiman/history.db
//! ~/.local/state/tuiman/tuiman.log
//! ~/.cache/tuiman/             cache dir
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::config::AppConfig;
use crate::error::{classify_io_error, SystemError, TuimanResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub requests_dir: PathBuf,
    pub secrets_file: PathBuf,
    pub state_dir: PathBuf,
    pub history_db: PathBuf,
    pub log_file: PathBuf,
    pub cache_dir: PathBuf,
}

impl AppPaths {
    /// Resolve paths from the config overrides and the home directory.
    pub fn discover(config: &AppConfig) -> TuimanResult<Self> {
        let home = dirs::home_dir();
        let under_home = |override_dir: &Option<PathBuf>, rel: &str| -> TuimanResult<PathBuf> {
            match (override_dir, &home) {
                (Some(dir), _) => Ok(dir.clone()),
                (None, Some(home)) => Ok(home.join(rel)),
                (None, None) => Err(SystemError::NoHomeDirectory.into()),
            }
        };

        let config_dir = under_home(&config.config_dir, ".config/tuiman")?;
        let state_dir = under_home(&config.state_dir, ".local/state/tuiman")?;
        let cache_dir = under_home(&config.cache_dir, ".cache/tuiman")?;

        Ok(Self::from_dirs(config_dir, state_dir, cache_dir))
    }

    /// Derive every path from the three base directories.
    pub fn from_dirs(config_dir: PathBuf, state_dir: PathBuf, cache_dir: PathBuf) -> Self {
        Self {
            requests_dir: config_dir.join("requests"),
            secrets_file: config_dir.join("secrets.json"),
            history_db: state_dir.join("history.db"),
            log_file: state_dir.join("tuiman.log"),
            config_dir,
            state_dir,
            cache_dir,
        }
    }

    /// Create all directories, owner-only on unix.
    pub fn ensure(&self) -> TuimanResult<()> {
        for dir in [
            &self.config_dir,
            &self.requests_dir,
            &self.state_dir,
            &self.cache_dir,
        ] {
            ensure_private_dir(dir)?;
        }
        Ok(())
    }
}

fn ensure_private_dir(dir: &Path) -> TuimanResult<()> {
    if !dir.is_dir() {
        debug!(path = %dir.display(), "creating directory");
        create_dir(dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                classify_io_error(e, Some(dir.to_path_buf()), "create directory")
            }
            _ => SystemError::DirectoryCreationFailed {
                path: dir.to_path_buf(),
                message: e.to_string(),
            },
        })?;
    }
    Ok(())
}

#[cfg(unix)]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
