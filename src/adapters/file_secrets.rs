//! File-backed secret store: a JSON object of reference to value.
//!
//! The file is created with mode 0600 on unix. Used where no platform
//! keyring is available.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::traits::{SecretError, SecretStore};

const BACKEND: &str = "secrets file";

#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SecretError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| backend_error(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(backend_error(e.to_string())),
        }
    }

    fn write_all(&self, secrets: &BTreeMap<String, String>) -> Result<(), SecretError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| backend_error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(secrets).map_err(|e| backend_error(e.to_string()))?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = open_private(&tmp).map_err(|e| backend_error(e.to_string()))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| backend_error(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| backend_error(e.to_string()))
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

fn backend_error(message: String) -> SecretError {
    SecretError::Backend {
        backend: BACKEND.to_string(),
        message,
    }
}

impl SecretStore for FileSecretStore {
    fn set(&self, reference: &str, value: &str) -> Result<(), SecretError> {
        if reference.is_empty() {
            return Err(SecretError::EmptyReference);
        }
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut secrets = self.read_all()?;
        secrets.insert(reference.to_string(), value.to_string());
        self.write_all(&secrets)
    }

    fn get(&self, reference: &str) -> Result<String, SecretError> {
        if reference.is_empty() {
            return Err(SecretError::EmptyReference);
        }
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_all()?
            .remove(reference)
            .ok_or_else(|| SecretError::NotFound {
                reference: reference.to_string(),
            })
    }

    fn delete(&self, reference: &str) -> Result<(), SecretError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut secrets = self.read_all()?;
        if secrets.remove(reference).is_some() {
            self.write_all(&secrets)?;
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
