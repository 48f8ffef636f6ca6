//! Producer and consumer tasks over a shared [`BoundedQueue`].
//!
//! Both sides log what they see of the queue before they touch it: the
//! producer warns when its next push is going to wait, the consumer notes
//! when its next pop is going to wait. Those checks are only observations;
//! the state can change between the check and the call.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::bounded_queue::BoundedQueue;
use crate::config::QueueDemoConfig;
use crate::error::Result;

// =============================================================================
// Message numbering
// =============================================================================

/// Sequence numbers 1..=999, wrapping back to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCounter {
    next: u32,
}

impl MessageCounter {
    pub const MAX: u32 = 999;

    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(value: u32) -> Self {
        MessageCounter {
            next: value.clamp(1, Self::MAX),
        }
    }

    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn next(&mut self) -> u32 {
        let current = self.next;
        self.next = if current >= Self::MAX { 1 } else { current + 1 };
        current
    }
}

impl Default for MessageCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_message(seq: u32) -> String {
    format!("message #{:04} from producer", seq)
}

// =============================================================================
// Producer
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProducerStats {
    pub produced: u64,
    pub full_warnings: u64,
}

pub struct Producer {
    queue: Arc<BoundedQueue<String>>,
    batch_size: usize,
    delay: Duration,
    counter: MessageCounter,
    stats: ProducerStats,
}

impl Producer {
    pub fn new(queue: Arc<BoundedQueue<String>>, batch_size: usize, delay: Duration) -> Self {
        Producer {
            queue,
            batch_size,
            delay,
            counter: MessageCounter::new(),
            stats: ProducerStats::default(),
        }
    }

    pub fn with_counter(mut self, counter: MessageCounter) -> Self {
        self.counter = counter;
        self
    }

    pub fn stats(&self) -> ProducerStats {
        self.stats
    }

    /// Pushes one batch of messages, waiting on a full queue as needed.
    pub async fn push_batch(&mut self) {
        let capacity = self.queue.capacity();
        for i in 1..=self.batch_size {
            if self.queue.is_full() {
                warn!("queue is full, the next push waits for the consumer");
                self.stats.full_warnings += 1;
            }

            let seq = self.counter.next();
            let len = self.queue.push(format_message(seq)).await;
            self.stats.produced += 1;
            info!(len, capacity, "put -> queue [{} of {}]", i, self.batch_size);

            if seq == MessageCounter::MAX {
                info!("message counter reset to 1");
            }
        }
    }

    pub async fn run(mut self, cancel: CancellationToken) -> ProducerStats {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.push_batch() => {}
            }

            info!("[producer] sleeping");
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(self.delay) => {}
            }
        }
        self.stats
    }
}

// =============================================================================
// Consumer
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerStats {
    pub consumed: u64,
    pub empty_advisories: u64,
    /// Pops that left the queue empty.
    pub drained: u64,
}

pub struct Consumer {
    queue: Arc<BoundedQueue<String>>,
    delay: Duration,
    stats: ConsumerStats,
}

impl Consumer {
    pub fn new(queue: Arc<BoundedQueue<String>>, delay: Duration) -> Self {
        Consumer {
            queue,
            delay,
            stats: ConsumerStats::default(),
        }
    }

    pub fn stats(&self) -> ConsumerStats {
        self.stats
    }

    /// Pops one message, waiting on an empty queue as needed.
    pub async fn take_one(&mut self) -> String {
        if self.queue.is_empty() {
            info!("queue is empty, waiting for the next message");
            self.stats.empty_advisories += 1;
        }

        let (message, len) = self.queue.pop().await;
        self.stats.consumed += 1;
        if len == 0 {
            self.stats.drained += 1;
        }
        info!(len, capacity = self.queue.capacity(), "get <- queue");
        info!("    got '{}'", message);
        message
    }

    pub async fn run(mut self, cancel: CancellationToken) -> ConsumerStats {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.take_one() => {}
            }

            info!("[consumer] sleeping");
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(self.delay) => {}
            }
        }
        self.stats
    }
}

// =============================================================================
// Demo
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueDemoReport {
    pub producer: ProducerStats,
    pub consumer: ConsumerStats,
}

/// Starts one producer and one consumer on a fresh queue and waits for
/// `cancel`. Returns what each side did by then.
pub async fn run_queue_demo(config: QueueDemoConfig, cancel: CancellationToken) -> Result<QueueDemoReport> {
    let queue = Arc::new(BoundedQueue::new(config.capacity));

    let producer = Producer::new(Arc::clone(&queue), config.batch_size, config.producer_delay);
    let consumer = Consumer::new(queue, config.consumer_delay);

    let producer = tokio::spawn(producer.run(cancel.child_token()));
    let consumer = tokio::spawn(consumer.run(cancel.child_token()));

    cancel.cancelled().await;

    Ok(QueueDemoReport {
        producer: producer.await?,
        consumer: consumer.await?,
    })
}
