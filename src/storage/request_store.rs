//! File-backed request store: one pretty-printed JSON file per request.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::models::{is_safe_id, Request};

/// Reads and writes `<dir>/<id>.json` files.
#[derive(Debug, Clone)]
pub struct RequestStore {
    dir: PathBuf,
}

impl RequestStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StorageError> {
        Ok(self.dir.join(request_file_name(id)?))
    }

    /// All readable requests, sorted by name case-insensitively.
    ///
    /// A missing directory is an empty collection. Files that cannot be
    /// read or parsed are skipped.
    pub fn list(&self) -> Result<Vec<Request>, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io("read directory", &self.dir, e)),
        };

        let mut requests = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !has_json_extension(&path) {
                continue;
            }
            match read_request_file(&path) {
                Ok(request) => requests.push(request),
                Err(e) => warn!("Skipping unreadable request file: {}", e),
            }
        }

        sort_by_name(&mut requests);
        Ok(requests)
    }

    pub fn load(&self, id: &str) -> Result<Request, StorageError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StorageError::RequestNotFound { id: id.to_string() });
        }
        read_request_file(&path)
    }

    /// Insert or overwrite by id. Stamps `updated_at`.
    pub fn save(&self, request: &mut Request) -> Result<(), StorageError> {
        request.ensure_id();
        request.touch();

        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::io("create directory", &self.dir, e))?;

        let json = serde_json::to_string_pretty(request)?;
        let path = self.path_for(&request.id)?;
        write_atomic(&path, json.as_bytes())?;
        debug!("Saved request {} to {}", request.id, path.display());
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), StorageError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::RequestNotFound { id: id.to_string() })
            }
            Err(e) => Err(StorageError::io("delete", path, e)),
        }
    }
}

/// `<id>.json`, refusing ids that could leave the target directory.
pub(crate) fn request_file_name(id: &str) -> Result<String, StorageError> {
    if !is_safe_id(id) {
        return Err(StorageError::InvalidId { id: id.to_string() });
    }
    Ok(format!("{}.json", id))
}

pub(crate) fn has_json_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Parse one request file. A blank or unsafe id is replaced with a fresh one.
pub(crate) fn read_request_file(path: &Path) -> Result<Request, StorageError> {
    let text = fs::read_to_string(path).map_err(|e| StorageError::io("read", path, e))?;
    let mut request: Request =
        serde_json::from_str(&text).map_err(|e| StorageError::Corrupt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !request.id.is_empty() && !is_safe_id(&request.id) {
        warn!(
            "Replacing unsafe request id {:?} from {}",
            request.id,
            path.display()
        );
    }
    request.ensure_id();
    Ok(request)
}

/// Write via `<path>.tmp` then rename over the target.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = fs::write(&tmp, contents) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::io("write", &tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::io("rename", path, e));
    }
    Ok(())
}

fn sort_by_name(requests: &mut [Request]) {
    requests.sort_by_cached_key(|r| r.name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, RequestStore) {
        let dir = TempDir::new().unwrap();
        let store = RequestStore::new(dir.path().join("requests"));
        (dir, store)
    }

    fn request(name: &str) -> Request {
        Request {
            name: name.to_string(),
            url: "http://localhost".to_string(),
            ..Request::new()
        }
    }

    #[test]
    fn test_missing_dir_lists_empty() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        let mut req = request("Users");
        store.save(&mut req).unwrap();
        assert!(!req.updated_at.is_empty());

        let loaded = store.load(&req.id).unwrap();
        assert_eq!(loaded, req);
        assert!(store.dir().join(format!("{}.json", req.id)).exists());
        assert!(!store.dir().join(format!("{}.json.tmp", req.id)).exists());
    }

    #[test]
    fn test_save_overwrites_by_id() {
        let (_dir, store) = store();
        let mut req = request("a");
        store.save(&mut req).unwrap();
        let id = req.id.clone();
        req.name = "b".to_string();
        store.save(&mut req).unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].name, "b");
    }

    #[test]
    fn test_list_sorted_case_insensitively() {
        let (_dir, store) = store();
        for name in ["beta", "Alpha", "gamma", "Delta"] {
            store.save(&mut request(name)).unwrap();
        }
        let names: Vec<String> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Delta", "gamma"]);
    }

    #[test]
    fn test_list_skips_unreadable_files() {
        let (_dir, store) = store();
        store.save(&mut request("ok")).unwrap();
        fs::write(store.dir().join("broken.json"), "{not json").unwrap();
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "ok");
    }

    #[test]
    fn test_missing_fields_default_and_blank_id_is_filled() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.dir().join("legacy.json"),
            r#"{"id": "", "name": "Legacy", "url": "http://x"}"#,
        )
        .unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].id.is_empty());
        assert_eq!(all[0].method, "GET");
        assert_eq!(all[0].auth_type, "none");
        assert_eq!(all[0].body, "");
    }

    #[test]
    fn test_unsafe_ids_are_refused() {
        let (dir, store) = store();
        for id in ["../escaped", "a/b", ".."] {
            assert!(matches!(store.load(id), Err(StorageError::InvalidId { .. })));
            assert!(matches!(store.delete(id), Err(StorageError::InvalidId { .. })));
        }
        assert!(!dir.path().join("escaped.json").exists());
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        let mut req = request("gone");
        store.save(&mut req).unwrap();
        store.delete(&req.id).unwrap();
        assert!(matches!(
            store.load(&req.id),
            Err(StorageError::RequestNotFound { .. })
        ));
        assert!(matches!(
            store.delete(&req.id),
            Err(StorageError::RequestNotFound { .. })
        ));
    }
}
