//! Bounded multi-producer/multi-consumer dispatch queue
//!
//! Carries log records, flush requests, and terminate sentinels from
//! application threads to the worker pool. The buffer is a mutex/condvar
//! guarded ring; the overflow policy chosen at construction governs producer
//! behavior when the buffer is full.

use super::{logger::Logger, metrics::QueueMetrics, record::LogRecord};
use crossbeam_channel::Sender;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Producer behavior when the queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Suspend the producer until space is available. While the queue is being
    /// torn down the enqueue fails silently instead of deadlocking shutdown.
    #[default]
    Block,

    /// Evict the oldest queued message and insert the new one; the producer
    /// never blocks.
    OverflowOldest,

    /// Drop the new message immediately; the producer never blocks.
    DiscardNew,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::OverflowOldest => write!(f, "OverflowOldest"),
            OverflowPolicy::DiscardNew => write!(f, "DiscardNew"),
        }
    }
}

/// Message variants carried by the queue.
///
/// A message is moved into the queue by its producer and consumed by exactly
/// one worker.
pub enum QueueMessage {
    /// A log event bound for the target logger's sink-write path.
    Record {
        logger: Arc<Logger>,
        record: LogRecord,
    },
    /// Flush every sink of the target logger; `done` releases a caller
    /// waiting synchronously for completion.
    Flush {
        logger: Arc<Logger>,
        done: Option<Sender<()>>,
    },
    /// Poison pill: the worker that dequeues it exits its loop.
    Terminate,
}

struct QueueState {
    buf: VecDeque<QueueMessage>,
    shutting_down: bool,
}

pub struct DispatchQueue {
    state: Mutex<QueueState>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
    policy: OverflowPolicy,
    metrics: QueueMetrics,
}

impl DispatchQueue {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                buf: VecDeque::with_capacity(capacity),
                shutting_down: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
            policy,
            metrics: QueueMetrics::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn metrics(&self) -> &QueueMetrics {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.state.lock().buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().buf.is_empty()
    }

    /// Offer a message under the configured overflow policy.
    ///
    /// Returns `true` if the message was accepted. Once a message is accepted
    /// it is delivered to exactly one worker; `false` means the policy (or an
    /// in-progress shutdown) dropped it.
    pub fn enqueue(&self, msg: QueueMessage) -> bool {
        let mut state = self.state.lock();

        if state.shutting_down {
            self.metrics.record_dropped();
            return false;
        }

        if state.buf.len() >= self.capacity {
            self.metrics.record_queue_full();
            match self.policy {
                OverflowPolicy::Block => {
                    self.metrics.record_block();
                    while state.buf.len() >= self.capacity && !state.shutting_down {
                        self.not_full.wait(&mut state);
                    }
                    if state.shutting_down {
                        self.metrics.record_dropped();
                        return false;
                    }
                }
                OverflowPolicy::OverflowOldest => {
                    state.buf.pop_front();
                    self.metrics.record_dropped();
                }
                OverflowPolicy::DiscardNew => {
                    self.metrics.record_dropped();
                    return false;
                }
            }
        }

        state.buf.push_back(msg);
        self.metrics.record_enqueued();
        drop(state);
        self.not_empty.notify_one();
        true
    }

    /// Append a terminate sentinel, bypassing the capacity check so teardown
    /// can never be locked out by a full buffer.
    pub(crate) fn post_terminate(&self) {
        let mut state = self.state.lock();
        state.buf.push_back(QueueMessage::Terminate);
        drop(state);
        self.not_empty.notify_one();
    }

    /// Take the next message, suspending while the queue is empty.
    pub fn dequeue(&self) -> QueueMessage {
        let mut state = self.state.lock();
        loop {
            if let Some(msg) = state.buf.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return msg;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Stop accepting enqueues and wake every suspended producer so it can
    /// observe the shutdown and drop its message.
    pub fn begin_shutdown(&self) {
        let mut state = self.state.lock();
        state.shutting_down = true;
        drop(state);
        self.not_full.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use std::sync::Arc;
    use std::time::Duration;

    fn queue_logger() -> Arc<Logger> {
        Logger::new("queue-test", Vec::new())
    }

    fn record_msg(logger: &Arc<Logger>, text: &str) -> QueueMessage {
        QueueMessage::Record {
            logger: Arc::clone(logger),
            record: LogRecord::new("queue-test", LogLevel::Info, text.to_string()),
        }
    }

    fn message_text(msg: QueueMessage) -> Option<String> {
        match msg {
            QueueMessage::Record { record, .. } => Some(record.message),
            _ => None,
        }
    }

    #[test]
    fn test_overflow_policy_default() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
    }

    #[test]
    fn test_overflow_policy_display() {
        assert_eq!(OverflowPolicy::Block.to_string(), "Block");
        assert_eq!(OverflowPolicy::OverflowOldest.to_string(), "OverflowOldest");
        assert_eq!(OverflowPolicy::DiscardNew.to_string(), "DiscardNew");
    }

    #[test]
    fn test_fifo_within_capacity() {
        let logger = queue_logger();
        let queue = DispatchQueue::new(4, OverflowPolicy::DiscardNew);

        for i in 0..4 {
            assert!(queue.enqueue(record_msg(&logger, &format!("m{}", i))));
        }
        for i in 0..4 {
            assert_eq!(message_text(queue.dequeue()).as_deref(), Some(&*format!("m{}", i)));
        }
    }

    #[test]
    fn test_discard_new_drops_excess() {
        let logger = queue_logger();
        let queue = DispatchQueue::new(2, OverflowPolicy::DiscardNew);

        assert!(queue.enqueue(record_msg(&logger, "m0")));
        assert!(queue.enqueue(record_msg(&logger, "m1")));
        assert!(!queue.enqueue(record_msg(&logger, "m2")));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.metrics().dropped_count(), 1);
        assert_eq!(message_text(queue.dequeue()).as_deref(), Some("m0"));
    }

    #[test]
    fn test_overflow_oldest_evicts_front() {
        let logger = queue_logger();
        let queue = DispatchQueue::new(2, OverflowPolicy::OverflowOldest);

        assert!(queue.enqueue(record_msg(&logger, "m0")));
        assert!(queue.enqueue(record_msg(&logger, "m1")));
        assert!(queue.enqueue(record_msg(&logger, "m2")));

        assert_eq!(queue.len(), 2);
        assert_eq!(message_text(queue.dequeue()).as_deref(), Some("m1"));
        assert_eq!(message_text(queue.dequeue()).as_deref(), Some("m2"));
    }

    #[test]
    fn test_terminate_bypasses_full_buffer() {
        let logger = queue_logger();
        let queue = DispatchQueue::new(1, OverflowPolicy::DiscardNew);

        assert!(queue.enqueue(record_msg(&logger, "m0")));
        queue.post_terminate();

        assert_eq!(queue.len(), 2);
        assert!(matches!(queue.dequeue(), QueueMessage::Record { .. }));
        assert!(matches!(queue.dequeue(), QueueMessage::Terminate));
    }

    #[test]
    fn test_block_producer_wakes_on_dequeue() {
        let logger = queue_logger();
        let queue = Arc::new(DispatchQueue::new(1, OverflowPolicy::Block));
        assert!(queue.enqueue(record_msg(&logger, "first")));

        let producer = {
            let queue = Arc::clone(&queue);
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || queue.enqueue(record_msg(&logger, "second")))
        };

        // Give the producer time to park on the full queue, then free a slot.
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(message_text(queue.dequeue()).as_deref(), Some("first"));

        assert!(producer.join().expect("producer thread panicked"));
        assert_eq!(message_text(queue.dequeue()).as_deref(), Some("second"));
    }

    #[test]
    fn test_shutdown_releases_blocked_producer() {
        let logger = queue_logger();
        let queue = Arc::new(DispatchQueue::new(1, OverflowPolicy::Block));
        assert!(queue.enqueue(record_msg(&logger, "first")));

        let producer = {
            let queue = Arc::clone(&queue);
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || queue.enqueue(record_msg(&logger, "blocked")))
        };

        std::thread::sleep(Duration::from_millis(50));
        queue.begin_shutdown();

        assert!(!producer.join().expect("producer thread panicked"));
        // The message accepted before shutdown is still there.
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_enqueue_rejected_after_shutdown() {
        let logger = queue_logger();
        let queue = DispatchQueue::new(4, OverflowPolicy::Block);
        queue.begin_shutdown();

        assert!(!queue.enqueue(record_msg(&logger, "late")));
        assert_eq!(queue.metrics().dropped_count(), 1);
    }
}
