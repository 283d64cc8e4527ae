// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types returned by queue operations.

/// The result of an n-ary peek or dequeue.
///
/// `items` holds the decoded items in FIFO order. `skipped` counts records that
/// were consumed by the read (and removed, for a dequeue) but whose payload
/// could not be decoded, so `items.len() + skipped` is the number of records
/// the operation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Batch<T> {
    /// Creates a batch in which every consumed record decoded successfully.
    pub fn new(items: Vec<T>) -> Self {
        Self { items, skipped: 0 }
    }

    /// Number of decoded items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no item was decoded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records the read consumed, decodable or not.
    pub fn consumed(&self) -> usize {
        self.items.len() + self.skipped
    }

    /// Discards the skip count and returns the decoded items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> IntoIterator for Batch<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Batch<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
