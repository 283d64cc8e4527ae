// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four precompiled statements a queue runs.
//!
//! Statements live in the connection's prepared-statement cache. Each use
//! borrows one for the duration of a call; returning it to the cache resets
//! the cursor and clears its bindings, so no parameter survives into the
//! next call. Both head statements order by `seq`, which is what makes the
//! delete remove exactly the rows the select returned.

use rusqlite::{CachedStatement, Connection};
use sqlqueue_core::QueueError;
use strum::{EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::database::prepare_err;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Statement {
    Insert,
    SelectHead,
    DeleteHead,
    CountRecords,
}

impl Statement {
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Insert => "INSERT INTO queue_records (identifier, payload) VALUES (?1, ?2)",
            Self::SelectHead => {
                "SELECT seq, identifier, payload FROM queue_records ORDER BY seq ASC LIMIT ?1"
            }
            Self::DeleteHead => {
                "DELETE FROM queue_records WHERE seq IN \
                 (SELECT seq FROM queue_records ORDER BY seq ASC LIMIT ?1)"
            }
            Self::CountRecords => "SELECT COUNT(*) FROM queue_records",
        }
    }

    /// Borrow this statement from the connection's cache, compiling it on first use.
    pub fn cached(self, conn: &Connection) -> Result<CachedStatement<'_>, QueueError> {
        conn.prepare_cached(self.sql()).map_err(|e| prepare_err(self, e))
    }
}

/// Compile every statement into the cache so that a broken schema fails at
/// open time instead of on first use.
pub fn prepare_all(conn: &Connection) -> Result<(), QueueError> {
    for statement in Statement::iter() {
        statement.cached(conn)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SCHEMA;

    #[test]
    fn names_are_snake_case() {
        let names: Vec<&'static str> = Statement::iter().map(Into::into).collect();
        assert_eq!(
            names,
            vec!["insert", "select_head", "delete_head", "count_records"]
        );
    }

    #[test]
    fn all_statements_compile_against_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        prepare_all(&conn).unwrap();
    }

    #[test]
    fn missing_table_reports_first_failing_statement() {
        let conn = Connection::open_in_memory().unwrap();
        let err = prepare_all(&conn).unwrap_err();
        match err {
            QueueError::PrepareFailed {
                statement,
                code,
                message,
            } => {
                assert_eq!(statement, "insert");
                assert_eq!(code, rusqlite::ffi::SQLITE_ERROR);
                assert!(message.contains("queue_records"), "message: {message}");
            }
            other => panic!("expected PrepareFailed, got {other:?}"),
        }
    }
}
