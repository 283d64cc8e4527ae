// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type-erased queue handle.
//!
//! [`AnyQueue`] hides the concrete backend behind a trait object so queues of
//! the same item type can be stored and passed around uniformly, regardless
//! of which backend produced them.

use std::fmt;
use std::sync::Arc;

use crate::error::QueueError;
use crate::traits::Queue;
use crate::types::Batch;

type DynQueue<T> = dyn Queue<Item = T> + Send + Sync;

/// A cloneable, type-erased [`Queue`].
///
/// Every trait method forwards explicitly to the wrapped backend, including
/// the derived ones, so a backend that overrides a derived method (such as an
/// atomic `enqueue_all`) keeps that behavior behind the wrapper. Clones share
/// the same backend instance.
pub struct AnyQueue<T> {
    inner: Arc<DynQueue<T>>,
}

impl<T> AnyQueue<T> {
    /// Wraps a concrete backend.
    pub fn new<Q>(queue: Q) -> Self
    where
        Q: Queue<Item = T> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(queue),
        }
    }

    /// Wraps a backend that is already shared elsewhere.
    pub fn from_shared<Q>(queue: Arc<Q>) -> Self
    where
        Q: Queue<Item = T> + Send + Sync + 'static,
    {
        Self { inner: queue }
    }
}

impl<T> Clone for AnyQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for AnyQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyQueue").finish_non_exhaustive()
    }
}

impl<T> Queue for AnyQueue<T> {
    type Item = T;

    fn count(&self) -> Result<usize, QueueError> {
        self.inner.count()
    }

    fn enqueue(&self, item: T) -> Result<(), QueueError> {
        self.inner.enqueue(item)
    }

    fn peek_n(&self, n: usize, delete_after_peek: bool) -> Result<Option<Batch<T>>, QueueError> {
        self.inner.peek_n(n, delete_after_peek)
    }

    fn is_empty(&self) -> Result<bool, QueueError> {
        self.inner.is_empty()
    }

    fn enqueue_all(&self, items: Vec<T>) -> Result<(), QueueError> {
        self.inner.enqueue_all(items)
    }

    fn dequeue_n(&self, n: usize) -> Result<Option<Batch<T>>, QueueError> {
        self.inner.dequeue_n(n)
    }

    fn dequeue(&self) -> Result<Option<T>, QueueError> {
        self.inner.dequeue()
    }

    fn peek(&self) -> Result<Option<T>, QueueError> {
        self.inner.peek()
    }
}

/// Conversion of any shareable backend into an [`AnyQueue`].
pub trait IntoAnyQueue: Queue + Sized {
    fn into_any_queue(self) -> AnyQueue<Self::Item>;
}

impl<Q> IntoAnyQueue for Q
where
    Q: Queue + Send + Sync + 'static,
{
    fn into_any_queue(self) -> AnyQueue<Q::Item> {
        AnyQueue::new(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::memory::MemoryQueue;

    /// Backend that overrides every method and records which one ran.
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<&'static str>>,
    }

    impl Recording {
        fn record(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }

        fn take(&self) -> Vec<&'static str> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl Queue for Recording {
        type Item = String;

        fn count(&self) -> Result<usize, QueueError> {
            self.record("count");
            Ok(0)
        }

        fn enqueue(&self, _item: String) -> Result<(), QueueError> {
            self.record("enqueue");
            Ok(())
        }

        fn peek_n(&self, _n: usize, delete: bool) -> Result<Option<Batch<String>>, QueueError> {
            self.record(if delete { "peek_n(delete)" } else { "peek_n" });
            Ok(Some(Batch::default()))
        }

        fn is_empty(&self) -> Result<bool, QueueError> {
            self.record("is_empty");
            Ok(true)
        }

        fn enqueue_all(&self, _items: Vec<String>) -> Result<(), QueueError> {
            self.record("enqueue_all");
            Ok(())
        }

        fn dequeue_n(&self, _n: usize) -> Result<Option<Batch<String>>, QueueError> {
            self.record("dequeue_n");
            Ok(Some(Batch::default()))
        }

        fn dequeue(&self) -> Result<Option<String>, QueueError> {
            self.record("dequeue");
            Ok(None)
        }

        fn peek(&self) -> Result<Option<String>, QueueError> {
            self.record("peek");
            Ok(None)
        }
    }

    #[test]
    fn every_operation_is_forwarded() {
        let backend = Arc::new(Recording::default());
        let any = AnyQueue::from_shared(Arc::clone(&backend));

        any.count().unwrap();
        any.enqueue("x".into()).unwrap();
        any.peek_n(3, false).unwrap();
        any.peek_n(3, true).unwrap();
        any.is_empty().unwrap();
        any.enqueue_all(vec!["y".into()]).unwrap();
        any.dequeue_n(2).unwrap();
        any.dequeue().unwrap();
        any.peek().unwrap();

        assert_eq!(
            backend.take(),
            vec![
                "count",
                "enqueue",
                "peek_n",
                "peek_n(delete)",
                "is_empty",
                "enqueue_all",
                "dequeue_n",
                "dequeue",
                "peek",
            ]
        );
    }

    #[test]
    fn heterogeneous_backends_share_one_type() {
        let queues: Vec<AnyQueue<String>> = vec![
            MemoryQueue::new().into_any_queue(),
            AnyQueue::new(Recording::default()),
        ];

        for q in &queues {
            q.enqueue("hello".into()).unwrap();
        }
        assert_eq!(queues[0].peek().unwrap().as_deref(), Some("hello"));
        assert_eq!(queues[1].peek().unwrap(), None);
    }

    #[test]
    fn clones_share_the_backend() {
        let a = MemoryQueue::new().into_any_queue();
        let b = a.clone();
        a.enqueue("shared".to_string()).unwrap();
        assert_eq!(b.count().unwrap(), 1);
        assert_eq!(b.dequeue().unwrap().as_deref(), Some("shared"));
        assert!(a.is_empty().unwrap());
    }

    fn drain_all(queue: &AnyQueue<u64>) -> Vec<u64> {
        let count = queue.count().unwrap();
        queue
            .dequeue_n(count)
            .unwrap()
            .map(Batch::into_items)
            .unwrap_or_default()
    }

    #[test]
    fn usable_as_function_parameter() {
        let q = MemoryQueue::new().into_any_queue();
        q.enqueue_all(vec![3, 1, 2]).unwrap();
        assert_eq!(drain_all(&q), vec![3, 1, 2]);
        assert!(drain_all(&q).is_empty());
    }
}
