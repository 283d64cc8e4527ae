// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the queue table.

use rusqlite::Row;

/// One stored queue entry. Records are written once and only ever read or
/// deleted whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Insertion-order key assigned by the engine.
    pub seq: i64,
    /// UUID assigned at insertion.
    pub identifier: String,
    /// The item's storable text.
    pub payload: String,
}

impl Record {
    /// Map a `SELECT seq, identifier, payload` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            seq: row.get(0)?,
            identifier: row.get(1)?,
            payload: row.get(2)?,
        })
    }
}
