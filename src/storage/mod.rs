//! On-disk persistence.
//!
//! - [`request_store`] - One JSON file per saved request
//! - [`history_log`] - SQLite log of every send
//! - [`transfer`] - Export/import of the whole collection

pub mod history_log;
pub mod request_store;
pub mod transfer;

pub use history_log::HistoryLog;
pub use request_store::RequestStore;
pub use transfer::{export_requests, import_requests, ExportManifest, ExportReport, EXPORT_FORMAT};
