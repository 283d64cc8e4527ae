// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for sqlqueue.
//!
//! [`SqliteQueue`] stores each item as one row of a single table, ordered by
//! an auto-incrementing sequence key. Statements are prepared once per
//! connection and reused through rusqlite's statement cache; a mutex per
//! instance serializes every operation.

pub mod database;
pub mod models;
pub mod queue;
pub mod statements;

pub use models::Record;
pub use queue::SqliteQueue;
