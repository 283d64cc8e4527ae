// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Volatile in-process queue backend.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::error::QueueError;
use crate::traits::Queue;
use crate::types::Batch;

/// A non-durable FIFO queue held in memory.
///
/// Items are kept as values, so nothing is ever skipped on read. Peeking
/// clones the items at the head.
#[derive(Debug)]
pub struct MemoryQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> MemoryQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<T>>, QueueError> {
        self.items.lock().map_err(|_| QueueError::LockPoisoned)
    }
}

impl<T> Default for MemoryQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Queue for MemoryQueue<T> {
    type Item = T;

    fn count(&self) -> Result<usize, QueueError> {
        Ok(self.lock()?.len())
    }

    fn enqueue(&self, item: T) -> Result<(), QueueError> {
        self.lock()?.push_back(item);
        Ok(())
    }

    fn peek_n(&self, n: usize, delete_after_peek: bool) -> Result<Option<Batch<T>>, QueueError> {
        if n == 0 {
            return Ok(None);
        }
        let mut items = self.lock()?;
        let take = n.min(items.len());
        let head = if delete_after_peek {
            items.drain(..take).collect()
        } else {
            items.iter().take(take).cloned().collect()
        };
        Ok(Some(Batch::new(head)))
    }

    fn enqueue_all(&self, items: Vec<T>) -> Result<(), QueueError> {
        self.lock()?.extend(items);
        Ok(())
    }
}
