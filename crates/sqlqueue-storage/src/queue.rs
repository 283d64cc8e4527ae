// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable FIFO queue backed by a single SQLite file.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use sqlqueue_config::{ConfigError, StorageConfig};
use sqlqueue_core::{Batch, Queue, QueueError, StorableItem};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::{self, step_err};
use crate::models::Record;
use crate::statements::{self, Statement};

/// A persistent queue of `T` stored in one SQLite file.
///
/// All operations on an instance are serialized by a mutex around the
/// connection, since the cached statements cannot be bound and stepped from
/// two threads at once. Separate instances share nothing.
///
/// Dropping the queue releases the cached statements and the connection.
/// Use [`SqliteQueue::close`] to observe errors from that release.
pub struct SqliteQueue<T> {
    path: PathBuf,
    conn: Mutex<Connection>,
    _item: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for SqliteQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteQueue")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<T: StorableItem> SqliteQueue<T> {
    /// Open the queue stored at `path`, creating the file if needed, with
    /// default storage settings.
    ///
    /// Paths that are not valid UTF-8 are rejected as [`QueueError::InvalidPath`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, QueueError> {
        let path = path.as_ref().to_str().ok_or(QueueError::InvalidPath)?;
        Self::open_with_config(&StorageConfig::for_path(path))
    }

    /// Open the queue described by the layered `sqlqueue.toml` files and
    /// `SQLQUEUE_*` environment overrides.
    ///
    /// Every configuration error is reported, joined into one
    /// [`QueueError::Config`].
    pub fn open_from_config() -> Result<Self, QueueError> {
        let config = sqlqueue_config::load_and_validate().map_err(config_err)?;
        Self::open_with_config(&config.storage)
    }

    /// Open the queue described by `config`.
    pub fn open_with_config(config: &StorageConfig) -> Result<Self, QueueError> {
        let conn = database::open_connection(config)?;
        statements::prepare_all(&conn)?;
        Ok(Self {
            path: PathBuf::from(&config.database_path),
            conn: Mutex::new(conn),
            _item: PhantomData,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw records at the head of the queue, without decoding or removing them.
    pub fn head_records(&self, n: usize) -> Result<Vec<Record>, QueueError> {
        let conn = self.lock()?;
        select_head(&conn, n)
    }

    /// Release the cached statements, then the connection.
    ///
    /// A lock poisoned by a panicked operation does not prevent closing.
    pub fn close(self) -> Result<(), QueueError> {
        let conn = self.conn.into_inner().unwrap_or_else(PoisonError::into_inner);
        conn.flush_prepared_statement_cache();
        conn.close().map_err(|(_conn, e)| step_err(e))?;
        debug!(path = %self.path.display(), "queue store closed");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, QueueError> {
        self.conn.lock().map_err(|_| QueueError::LockPoisoned)
    }

    fn decode(&self, records: Vec<Record>) -> Batch<T> {
        let mut batch = Batch::default();
        for record in records {
            match T::from_storable(&record.payload) {
                Some(item) => batch.items.push(item),
                None => {
                    warn!(
                        path = %self.path.display(),
                        seq = record.seq,
                        identifier = %record.identifier,
                        "skipping undecodable queue record"
                    );
                    batch.skipped += 1;
                }
            }
        }
        batch
    }
}

impl<T: StorableItem> Queue for SqliteQueue<T> {
    type Item = T;

    fn count(&self) -> Result<usize, QueueError> {
        let conn = self.lock()?;
        let mut stmt = Statement::CountRecords.cached(&conn)?;
        let count: Option<i64> = stmt
            .query_row([], |row| row.get(0))
            .optional()
            .map_err(step_err)?;
        Ok(count.and_then(|c| usize::try_from(c).ok()).unwrap_or(0))
    }

    fn enqueue(&self, item: T) -> Result<(), QueueError> {
        let payload = serialize(&item)?;
        let conn = self.lock()?;
        insert(&conn, &payload)
    }

    fn peek_n(&self, n: usize, delete_after_peek: bool) -> Result<Option<Batch<T>>, QueueError> {
        if n == 0 {
            return Ok(None);
        }
        let mut conn = self.lock()?;

        let records = if delete_after_peek {
            // Read and delete under one write lock so no other connection
            // can change the head in between.
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(step_err)?;
            let records = select_head(&tx, n)?;
            let deleted = delete_head(&tx, n)?;
            debug_assert_eq!(deleted, records.len());
            tx.commit().map_err(step_err)?;
            records
        } else {
            select_head(&conn, n)?
        };
        drop(conn);

        Ok(Some(self.decode(records)))
    }

    /// Insert every item in one transaction. If any item fails to serialize,
    /// nothing is written.
    fn enqueue_all(&self, items: Vec<T>) -> Result<(), QueueError> {
        let payloads = items
            .iter()
            .map(serialize)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(step_err)?;
        for payload in &payloads {
            insert(&tx, payload)?;
        }
        tx.commit().map_err(step_err)
    }
}

fn config_err(errors: Vec<ConfigError>) -> QueueError {
    let message = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
    QueueError::Config(message)
}

fn serialize<T: StorableItem>(item: &T) -> Result<String, QueueError> {
    item.to_storable().map_err(|source| QueueError::SerializationFailed { source })
}

fn limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn insert(conn: &Connection, payload: &str) -> Result<(), QueueError> {
    let mut stmt = Statement::Insert.cached(conn)?;
    stmt.execute(params![Uuid::new_v4().to_string(), payload]).map_err(step_err)?;
    Ok(())
}

fn select_head(conn: &Connection, n: usize) -> Result<Vec<Record>, QueueError> {
    let mut stmt = Statement::SelectHead.cached(conn)?;
    let rows = stmt
        .query_map([limit(n)], Record::from_row)
        .map_err(step_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(step_err)
}

fn delete_head(conn: &Connection, n: usize) -> Result<usize, QueueError> {
    let mut stmt = Statement::DeleteHead.cached(conn)?;
    stmt.execute([limit(n)]).map_err(step_err)
}

#[cfg(test)]
mod tests {
    use sqlqueue_core::Json;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    use super::*;

    fn raw_insert(path: &Path, payloads: &[&str]) {
        let conn = Connection::open(path).unwrap();
        for payload in payloads {
            conn.execute(
                "INSERT INTO queue_records (identifier, payload) VALUES (?1, ?2)",
                params![Uuid::new_v4().to_string(), payload],
            )
            .unwrap();
        }
    }

    #[test]
    fn records_carry_unique_identifiers_and_increasing_seq() {
        let dir = tempdir().unwrap();
        let queue: SqliteQueue<String> = SqliteQueue::open(dir.path().join("q.db")).unwrap();
        for x in ["a", "b", "c"] {
            queue.enqueue(x.to_string()).unwrap();
        }

        let records = queue.head_records(10).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.windows(2).all(|w| w[0].seq < w[1].seq));
        assert!(records.iter().all(|r| Uuid::parse_str(&r.identifier).is_ok()));
        assert_ne!(records[0].identifier, records[1].identifier);
        assert_eq!(records[2].payload, "c");
    }

    #[test]
    fn seq_keeps_increasing_after_queue_is_drained() {
        let dir = tempdir().unwrap();
        let queue: SqliteQueue<String> = SqliteQueue::open(dir.path().join("q.db")).unwrap();
        queue.enqueue("first".into()).unwrap();
        let first_seq = queue.head_records(1).unwrap()[0].seq;
        queue.dequeue().unwrap();

        queue.enqueue("second".into()).unwrap();
        assert!(queue.head_records(1).unwrap()[0].seq > first_seq);
    }

    #[traced_test]
    #[test]
    fn undecodable_rows_are_counted_and_logged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.db");
        let queue: SqliteQueue<u64> = SqliteQueue::open(&path).unwrap();
        queue.enqueue(1).unwrap();
        raw_insert(&path, &["not-a-number"]);
        queue.enqueue(3).unwrap();

        let peeked = queue.peek_n(10, false).unwrap().unwrap();
        assert_eq!(peeked.items, vec![1, 3]);
        assert_eq!(peeked.skipped, 1);
        assert_eq!(queue.count().unwrap(), 3);
        assert!(logs_contain("skipping undecodable queue record"));

        let dequeued = queue.dequeue_n(10).unwrap().unwrap();
        assert_eq!(dequeued.consumed(), 3);
        assert_eq!(queue.count().unwrap(), 0);
    }

    #[test]
    fn undecodable_head_fails_single_reads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.db");
        let queue: SqliteQueue<u64> = SqliteQueue::open(&path).unwrap();
        raw_insert(&path, &["garbage"]);
        queue.enqueue(7).unwrap();

        assert!(matches!(
            queue.peek(),
            Err(QueueError::UndecodableRecords { count: 1 })
        ));
        assert!(matches!(
            queue.dequeue(),
            Err(QueueError::UndecodableRecords { count: 1 })
        ));
        assert_eq!(queue.dequeue().unwrap(), Some(7));
    }

    #[test]
    fn serialization_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let queue: SqliteQueue<Json<std::collections::HashMap<Vec<u8>, u8>>> =
            SqliteQueue::open(dir.path().join("q.db")).unwrap();

        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1u8], 1u8);
        let err = queue.enqueue(Json(bad.clone())).unwrap_err();
        assert!(matches!(err, QueueError::SerializationFailed { .. }));

        let err = queue
            .enqueue_all(vec![Json(Default::default()), Json(bad)])
            .unwrap_err();
        assert!(matches!(err, QueueError::SerializationFailed { .. }));
        assert_eq!(queue.count().unwrap(), 0);
    }

    #[test]
    fn close_releases_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.db");
        let queue: SqliteQueue<String> = SqliteQueue::open(&path).unwrap();
        queue.enqueue("kept".into()).unwrap();
        assert_eq!(queue.path(), path.as_path());
        queue.close().unwrap();

        let reopened: SqliteQueue<String> = SqliteQueue::open(&path).unwrap();
        assert_eq!(reopened.peek().unwrap().as_deref(), Some("kept"));
    }
}
