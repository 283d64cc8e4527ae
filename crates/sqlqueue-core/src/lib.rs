// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the sqlqueue persistent FIFO queue.
//!
//! This crate defines the [`Queue`] contract every backend implements, the
//! [`StorableItem`] conversion used to persist items as text, the
//! type-erased [`AnyQueue`] handle, and the shared [`QueueError`] taxonomy.
//! A volatile [`MemoryQueue`] backend is included; the durable SQLite backend
//! lives in `sqlqueue-storage`.

pub mod any;
pub mod error;
pub mod item;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use any::{AnyQueue, IntoAnyQueue};
pub use error::{ItemError, QueueError};
pub use item::{Json, StorableItem};
pub use memory::MemoryQueue;
pub use traits::Queue;
pub use types::Batch;
