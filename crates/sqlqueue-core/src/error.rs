// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every queue backend.

use thiserror::Error;

/// Boxed error produced when an item cannot be converted to its storable form.
pub type ItemError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by all [`Queue`](crate::Queue) operations.
///
/// Engine failures carry the storage engine's extended result code and its
/// message verbatim so callers can diagnose them without the engine types.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue was asked to open an empty or non-UTF-8 path.
    #[error("invalid queue path: path must be non-empty UTF-8")]
    InvalidPath,

    /// The layered configuration could not be loaded or failed validation.
    #[error("invalid queue configuration: {0}")]
    Config(String),

    /// The backing store could not be opened or configured.
    #[error("failed to open queue store (code {code}): {message}")]
    OpenFailed { code: i32, message: String },

    /// One of the precompiled statements failed to compile.
    #[error("failed to prepare `{statement}` statement (code {code}): {message}")]
    PrepareFailed {
        statement: &'static str,
        code: i32,
        message: String,
    },

    /// An item could not be converted to its storable form; nothing was written.
    #[error("failed to serialize queue item: {source}")]
    SerializationFailed { source: ItemError },

    /// Executing a statement against the store failed.
    #[error("queue statement failed (code {code}): {message}")]
    StepFailed { code: i32, message: String },

    /// A single-item read consumed only records whose payload could not be decoded.
    #[error("{count} queue record(s) could not be decoded")]
    UndecodableRecords { count: usize },

    /// A previous operation panicked while holding the instance lock.
    #[error("queue lock poisoned by a panicked operation")]
    LockPoisoned,
}

impl QueueError {
    /// Returns the storage engine's result code, if this error came from the engine.
    pub fn engine_code(&self) -> Option<i32> {
        match self {
            Self::OpenFailed { code, .. }
            | Self::PrepareFailed { code, .. }
            | Self::StepFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}
