// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The FIFO queue contract.

use crate::error::QueueError;
use crate::types::Batch;

/// A FIFO queue of items.
///
/// Backends implement [`count`](Queue::count), [`enqueue`](Queue::enqueue) and
/// [`peek_n`](Queue::peek_n). Everything else is derived from those three and
/// should not be overridden, with the exception of
/// [`enqueue_all`](Queue::enqueue_all) which a backend may make atomic.
///
/// All methods take `&self`: backends synchronize internally so a single
/// instance can be shared across threads.
pub trait Queue {
    /// The caller-visible item type.
    type Item;

    /// Number of items currently stored.
    fn count(&self) -> Result<usize, QueueError>;

    /// Appends one item to the tail of the queue.
    fn enqueue(&self, item: Self::Item) -> Result<(), QueueError>;

    /// Reads up to `n` items from the head of the queue in FIFO order.
    ///
    /// Returns `Ok(None)` when `n` is zero. When `delete_after_peek` is set,
    /// exactly the records consumed by this read are removed as part of the
    /// same operation.
    fn peek_n(
        &self,
        n: usize,
        delete_after_peek: bool,
    ) -> Result<Option<Batch<Self::Item>>, QueueError>;

    /// Returns true if the queue holds no items.
    fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.count()? == 0)
    }

    /// Appends several items in order.
    fn enqueue_all(&self, items: Vec<Self::Item>) -> Result<(), QueueError> {
        for item in items {
            self.enqueue(item)?;
        }
        Ok(())
    }

    /// Removes and returns up to `n` items from the head of the queue.
    fn dequeue_n(&self, n: usize) -> Result<Option<Batch<Self::Item>>, QueueError> {
        self.peek_n(n, true)
    }

    /// Removes and returns the head item, or `None` if the queue was empty.
    ///
    /// If the head record cannot be decoded it is still removed and
    /// [`QueueError::UndecodableRecords`] is returned, so the next call
    /// makes progress.
    fn dequeue(&self) -> Result<Option<Self::Item>, QueueError> {
        single(self.dequeue_n(1)?)
    }

    /// Returns the head item without removing it.
    fn peek(&self) -> Result<Option<Self::Item>, QueueError> {
        single(self.peek_n(1, false)?)
    }
}

fn single<T>(batch: Option<Batch<T>>) -> Result<Option<T>, QueueError> {
    let Some(batch) = batch else {
        return Ok(None);
    };
    let skipped = batch.skipped;
    match batch.items.into_iter().next() {
        Some(item) => Ok(Some(item)),
        None if skipped > 0 => Err(QueueError::UndecodableRecords { count: skipped }),
        None => Ok(None),
    }
}
