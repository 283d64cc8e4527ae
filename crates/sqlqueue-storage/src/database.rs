// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection setup for queue stores: open flags, PRAGMAs, and schema.
//!
//! Every failure is mapped into [`QueueError`] here so the queue code only
//! deals with one error type.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use sqlqueue_config::StorageConfig;
use sqlqueue_core::QueueError;
use strum::EnumCount;
use tracing::debug;

use crate::statements::Statement;

/// The queue table. `seq` is the insertion-order key; AUTOINCREMENT keeps it
/// strictly increasing even after the tail has been deleted.
pub const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS queue_records (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier TEXT NOT NULL UNIQUE,
    payload    TEXT NOT NULL
);";

/// Open (creating if absent) the store at `config.database_path` and make
/// sure the queue table exists.
///
/// The connection is returned only once fully configured; on any failure it
/// is dropped, and with it closed, before the error is returned.
pub fn open_connection(config: &StorageConfig) -> Result<Connection, QueueError> {
    let path = Path::new(&config.database_path);
    if config.database_path.is_empty() {
        return Err(QueueError::InvalidPath);
    }
    let existed = path.exists();

    // The queue mutex serializes access, so SQLite's own mutex is redundant.
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(open_err)?;

    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms)).map_err(open_err)?;
    let journal_mode = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "PRAGMA journal_mode={journal_mode};
         PRAGMA synchronous={};",
        config.synchronous.pragma_value()
    ))
    .map_err(open_err)?;

    conn.execute_batch(SCHEMA).map_err(open_err)?;
    conn.set_prepared_statement_cache_capacity(Statement::COUNT);

    debug!(
        path = %config.database_path,
        created = !existed,
        journal_mode,
        "queue store opened"
    );
    Ok(conn)
}

/// Split a rusqlite error into the engine's extended result code and message.
pub fn engine_error(err: &rusqlite::Error) -> (i32, String) {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => (
            code.extended_code,
            message.clone().unwrap_or_else(|| code.to_string()),
        ),
        other => (rusqlite::ffi::SQLITE_ERROR, other.to_string()),
    }
}

pub(crate) fn open_err(err: rusqlite::Error) -> QueueError {
    let (code, message) = engine_error(&err);
    QueueError::OpenFailed { code, message }
}

pub(crate) fn step_err(err: rusqlite::Error) -> QueueError {
    let (code, message) = engine_error(&err);
    QueueError::StepFailed { code, message }
}

pub(crate) fn prepare_err(statement: Statement, err: rusqlite::Error) -> QueueError {
    let (code, message) = engine_error(&err);
    QueueError::PrepareFailed {
        statement: statement.into(),
        code,
        message,
    }
}
