//! Fixed-capacity FIFO shared by one producer task and one consumer task.
//!
//! `push` waits while the queue is full and `pop` waits while it is empty.
//! This is the classic Mutex<VecDeque> + condition variable bounded queue,
//! with `Notify` standing in for `Condvar` so waiting suspends the task
//! instead of the thread. Both sides share one `Arc<BoundedQueue>` and read
//! the length and capacity straight from the deque under the same lock that
//! guards push and pop.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    not_empty: Notify,
    not_full: Notify,
}

impl<T> BoundedQueue<T> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "bounded queue capacity must be at least 1");
        BoundedQueue {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            not_empty: Notify::new(),
            not_full: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock().len() >= self.capacity
    }

    /// Appends `item`, waiting for a free slot first if the queue is full.
    /// Returns the length right after the push.
    pub async fn push(&self, item: T) -> usize {
        loop {
            let space = self.not_full.notified();
            {
                let mut items = self.lock();
                if items.len() < self.capacity {
                    items.push_back(item);
                    let len = items.len();
                    drop(items);
                    self.not_empty.notify_one();
                    return len;
                }
            }
            space.await;
        }
    }

    /// Removes the oldest item, waiting for one to arrive if the queue is
    /// empty. Returns the item and the length right after the pop.
    pub async fn pop(&self) -> (T, usize) {
        loop {
            let arrival = self.not_empty.notified();
            {
                let mut items = self.lock();
                if let Some(item) = items.pop_front() {
                    let len = items.len();
                    drop(items);
                    self.not_full.notify_one();
                    return (item, len);
                }
            }
            arrival.await;
        }
    }

    // Nothing panics while holding the lock, so a poisoned guard is still
    // consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = BoundedQueue::new(3);
        assert_eq!(queue.push("a").await, 1);
        assert_eq!(queue.push("b").await, 2);
        assert_eq!(queue.push("c").await, 3);

        assert_eq!(queue.pop().await, ("a", 2));
        assert_eq!(queue.pop().await, ("b", 1));
        assert_eq!(queue.pop().await, ("c", 0));
    }

    #[tokio::test]
    async fn test_interleaved_operations_keep_order_and_bound() {
        let queue = BoundedQueue::new(2);
        let mut popped = Vec::new();
        let mut next = 0;

        // push, push, pop, push, pop, pop, push, pop
        for op in "++-+--+-".chars() {
            if op == '+' {
                let len = queue.push(next).await;
                assert!(len <= queue.capacity());
                next += 1;
            } else {
                popped.push(queue.pop().await.0);
            }
            assert!(queue.len() <= queue.capacity());
        }

        assert_eq!(popped, vec![0, 1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_full_and_empty_flags() {
        let queue = BoundedQueue::new(2);
        assert!(queue.is_empty());
        assert!(!queue.is_full());

        queue.push(1).await;
        assert!(!queue.is_empty());
        assert!(!queue.is_full());

        queue.push(2).await;
        assert!(queue.is_full());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.capacity(), 2);
    }

    #[tokio::test]
    async fn test_push_waits_while_full() {
        let queue = BoundedQueue::new(1);
        queue.push(1).await;

        assert!(timeout(Duration::from_millis(50), queue.push(2)).await.is_err());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.pop().await, (1, 0));
        assert_eq!(queue.push(2).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_push_completes_after_pop() {
        let queue = Arc::new(BoundedQueue::new(2));
        queue.push(1).await;
        queue.push(2).await;

        let producer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.push(3).await })
        };

        sleep(Duration::from_secs(1)).await;
        assert!(!producer.is_finished());

        assert_eq!(queue.pop().await, (1, 1));
        assert_eq!(producer.await.unwrap(), 2);
        assert_eq!(queue.pop().await.0, 2);
        assert_eq!(queue.pop().await.0, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_pop_completes_after_push() {
        let queue = Arc::new(BoundedQueue::new(2));

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.pop().await })
        };

        sleep(Duration::from_secs(1)).await;
        assert!(!consumer.is_finished());

        queue.push("late".to_string()).await;
        assert_eq!(consumer.await.unwrap(), ("late".to_string(), 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_producer_consumer_preserves_order() {
        let queue = Arc::new(BoundedQueue::new(4));

        let producer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                for i in 0..500 {
                    let len = queue.push(i).await;
                    assert!(len <= 4);
                }
            })
        };

        let mut received = Vec::with_capacity(500);
        for _ in 0..500 {
            let (item, len) = queue.pop().await;
            assert!(len < 4);
            received.push(item);
        }
        producer.await.unwrap();

        assert_eq!(received, (0..500).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn test_zero_capacity_panics() {
        let _ = BoundedQueue::<u8>::new(0);
    }
}
