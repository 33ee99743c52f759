//! Export and import of the request collection.
//!
//! An export directory looks like:
//!
//! ```text
//! <dest>/manifest.json
//! <dest>/requests/<id>.json
//! ```
//!
//! Secret references are blanked on export; secret values never leave the
//! secret store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::request_store::{
    has_json_extension, read_request_file, request_file_name, write_atomic, RequestStore,
};
use crate::error::StorageError;
use crate::models::{utc_timestamp, Request};

pub const EXPORT_FORMAT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub format: u32,
    pub exported_at: String,
    pub request_count: usize,
    pub secrets_included: bool,
    pub scrubbed_secret_refs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub request_count: usize,
    pub scrubbed_secret_refs: usize,
}

/// Write every request to `<dest>/requests/` plus a manifest.
pub fn export_requests(requests: &[Request], dest: &Path) -> Result<ExportReport, StorageError> {
    let req_dir = dest.join("requests");
    fs::create_dir_all(&req_dir).map_err(|e| StorageError::io("create directory", &req_dir, e))?;

    let mut scrubbed = 0;
    for request in requests {
        let mut copy = request.clone();
        if !copy.auth_secret_ref.is_empty() {
            copy.auth_secret_ref.clear();
            scrubbed += 1;
        }
        let json = serde_json::to_string_pretty(&copy)?;
        write_atomic(&req_dir.join(request_file_name(&copy.id)?), json.as_bytes())?;
    }

    let manifest = ExportManifest {
        format: EXPORT_FORMAT,
        exported_at: utc_timestamp(),
        request_count: requests.len(),
        secrets_included: false,
        scrubbed_secret_refs: scrubbed,
    };
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    write_atomic(&dest.join("manifest.json"), json.as_bytes())?;

    info!(
        "Exported {} requests to {} ({} secret refs scrubbed)",
        requests.len(),
        dest.display(),
        scrubbed
    );
    Ok(ExportReport {
        request_count: requests.len(),
        scrubbed_secret_refs: scrubbed,
    })
}

/// Upsert every readable `<src>/requests/*.json` into `store`.
///
/// Returns the number of requests saved. Unreadable files are skipped, and
/// an id that is not a safe file name is replaced with a fresh one.
pub fn import_requests(store: &RequestStore, src: &Path) -> Result<usize, StorageError> {
    let req_dir = src.join("requests");
    let entries = fs::read_dir(&req_dir).map_err(|_| StorageError::MissingImportDirectory {
        path: req_dir.clone(),
    })?;

    let mut imported = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !has_json_extension(&path) {
            continue;
        }
        let mut request = match read_request_file(&path) {
            Ok(request) => request,
            Err(e) => {
                warn!("Skipping import file: {}", e);
                continue;
            }
        };
        match store.save(&mut request) {
            Ok(()) => imported += 1,
            Err(e) => warn!("Failed to import {}: {}", path.display(), e),
        }
    }

    info!("Imported {} requests from {}", imported, src.display());
    Ok(imported)
}
