//! Append-only run history in SQLite.

use std::path::Path;

use rusqlite::{params, Connection, Row};
use tracing::info;

use crate::error::StorageError;
use crate::models::{NewRun, Run};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    request_id TEXT NOT NULL,
    request_name TEXT NOT NULL,
    method TEXT NOT NULL,
    url TEXT NOT NULL,
    status_code INTEGER,
    duration_ms INTEGER,
    error TEXT,
    created_at TEXT NOT NULL,
    request_snapshot TEXT,
    response_body TEXT
)";

/// Columns added after the first release; older databases gain them on open.
const LATE_COLUMNS: [&str; 2] = ["request_snapshot", "response_body"];

pub struct HistoryLog {
    conn: Connection,
}

impl std::fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl HistoryLog {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA_SQL)?;
        migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Record a run and return its id.
    pub fn append(&self, run: &NewRun) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO runs (request_id, request_name, method, url, status_code, duration_ms, \
             error, created_at, request_snapshot, response_body) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                run.request_id,
                run.request_name,
                run.method,
                run.url,
                i64::from(run.status_code),
                i64::try_from(run.duration_ms).unwrap_or(i64::MAX),
                run.error,
                run.created_at,
                run.request_snapshot,
                run.response_body,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Up to `limit` runs, newest first.
    pub fn list(&self, limit: usize) -> Result<Vec<Run>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, request_id, request_name, method, url, status_code, duration_ms, error, \
             created_at, request_snapshot, response_body FROM runs ORDER BY id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], run_from_row)?;
        let runs = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(runs)
    }
}

fn migrate(conn: &Connection) -> Result<(), StorageError> {
    let existing = {
        let mut stmt = conn.prepare("PRAGMA table_info(runs)")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
        names.collect::<Result<Vec<_>, _>>()?
    };

    for column in LATE_COLUMNS {
        if !existing.iter().any(|c| c == column) {
            conn.execute_batch(&format!("ALTER TABLE runs ADD COLUMN {} TEXT", column))?;
            info!("Migrated history database: added column {}", column);
        }
    }
    Ok(())
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<Run> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };
    Ok(Run {
        id: row.get(0)?,
        request_id: text(1)?,
        request_name: text(2)?,
        method: text(3)?,
        url: text(4)?,
        status_code: row
            .get::<_, Option<i64>>(5)?
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(0),
        duration_ms: row
            .get::<_, Option<i64>>(6)?
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0),
        error: text(7)?,
        created_at: text(8)?,
        request_snapshot: text(9)?,
        response_body: text(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Request;
    use tempfile::TempDir;

    fn new_run(name: &str, status: u16) -> NewRun {
        let request = Request {
            name: name.to_string(),
            url: "http://x".to_string(),
            ..Request::new()
        };
        NewRun {
            status_code: status,
            duration_ms: 12,
            response_body: "{}".to_string(),
            ..NewRun::from_request(&request, "2026-01-01T00:00:00Z")
        }
    }

    #[test]
    fn test_append_and_list_newest_first() {
        let log = HistoryLog::open_in_memory().unwrap();
        let first = log.append(&new_run("one", 200)).unwrap();
        let second = log.append(&new_run("two", 404)).unwrap();
        assert!(second > first);

        let runs = log.list(10).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].request_name, "two");
        assert_eq!(runs[0].status_code, 404);
        assert_eq!(runs[1].id, first);
        assert!(runs[1].request_snapshot.starts_with("name: one\n"));
        assert_eq!(runs[1].response_body, "{}");
    }

    #[test]
    fn test_list_respects_limit() {
        let log = HistoryLog::open_in_memory().unwrap();
        for i in 0..5 {
            log.append(&new_run(&format!("r{}", i), 200)).unwrap();
        }
        let runs = log.list(2).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].request_name, "r4");
    }

    #[test]
    fn test_migrates_old_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE runs (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    request_id TEXT NOT NULL,
                    request_name TEXT NOT NULL,
                    method TEXT NOT NULL,
                    url TEXT NOT NULL,
                    status_code INTEGER,
                    duration_ms INTEGER,
                    error TEXT,
                    created_at TEXT NOT NULL
                );
                INSERT INTO runs (request_id, request_name, method, url, status_code, duration_ms, error, created_at)
                VALUES ('r1', 'old', 'GET', 'http://old', 200, 5, NULL, '2025-01-01T00:00:00Z');",
            )
            .unwrap();
        }

        let log = HistoryLog::open(&path).unwrap();
        let runs = log.list(10).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].request_snapshot, "");
        assert_eq!(runs[0].error, "");

        log.append(&new_run("new", 201)).unwrap();
        assert_eq!(log.list(10).unwrap()[0].request_name, "new");
    }
}
