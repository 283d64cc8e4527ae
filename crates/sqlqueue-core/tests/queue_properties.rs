// SPDX-FileCopyrightText: 2026 Sqlqueue Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the derived queue operations, run through the
//! type-erased handle.

use proptest::prelude::*;
use sqlqueue_core::{AnyQueue, IntoAnyQueue, MemoryQueue, Queue};

fn filled(items: &[String]) -> AnyQueue<String> {
    let queue = MemoryQueue::new().into_any_queue();
    for item in items {
        queue.enqueue(item.clone()).unwrap();
    }
    queue
}

proptest! {
    #[test]
    fn peek_is_idempotent(items in prop::collection::vec(".*", 0..40), n in 0usize..50) {
        let queue = filled(&items);
        let first = queue.peek_n(n, false).unwrap();
        let second = queue.peek_n(n, false).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(queue.count().unwrap(), items.len());
    }

    #[test]
    fn dequeue_n_removes_min_of_n_and_count_in_order(
        items in prop::collection::vec(".*", 0..40),
        n in 1usize..50,
    ) {
        let queue = filled(&items);
        let before = queue.count().unwrap();
        let batch = queue.dequeue_n(n).unwrap().unwrap();
        let removed = n.min(before);

        prop_assert_eq!(batch.items.as_slice(), &items[..removed]);
        prop_assert_eq!(queue.count().unwrap(), before - removed);
    }
}

#[test]
fn hundred_items_dequeued_in_order() {
    let items: Vec<String> = (1..=100).map(|x| x.to_string()).collect();
    let queue = filled(&items);
    assert_eq!(queue.count().unwrap(), 100);

    let batch = queue.dequeue_n(200).unwrap().unwrap();
    assert_eq!(batch.len(), 100);
    assert_eq!(batch.items, items);
    assert_eq!(queue.count().unwrap(), 0);
    assert_eq!(queue.dequeue().unwrap(), None);
}
