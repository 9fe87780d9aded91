//! Worker pool draining the dispatch queue
//!
//! A fixed set of background threads performs the actual sink I/O for
//! asynchronous loggers: dequeue, dispatch by message variant, repeat. Sink
//! failures are reported through the owning logger's error handler; a failure
//! never terminates a worker.

use super::{
    error::{LoggerError, Result},
    logger::Logger,
    metrics::QueueMetrics,
    queue::{DispatchQueue, OverflowPolicy, QueueMessage},
    record::LogRecord,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;
pub const DEFAULT_WORKER_COUNT: usize = 1;

pub struct WorkerPool {
    queue: Arc<DispatchQueue>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    pub fn new(queue_capacity: usize, policy: OverflowPolicy, worker_count: usize) -> Arc<Self> {
        let worker_count = worker_count.max(1);
        let queue = Arc::new(DispatchQueue::new(queue_capacity, policy));

        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let queue = Arc::clone(&queue);
            workers.push(thread::spawn(move || Self::worker_loop(&queue)));
        }

        Arc::new(Self {
            queue,
            workers: Mutex::new(workers),
        })
    }

    pub fn with_defaults() -> Arc<Self> {
        Self::new(
            DEFAULT_QUEUE_CAPACITY,
            OverflowPolicy::Block,
            DEFAULT_WORKER_COUNT,
        )
    }

    fn worker_loop(queue: &DispatchQueue) {
        loop {
            match queue.dequeue() {
                QueueMessage::Record { logger, record } => logger.write_record(&record),
                QueueMessage::Flush { logger, done } => {
                    logger.flush_sinks();
                    if let Some(done) = done {
                        // Receiver may be gone if the waiting caller timed out.
                        let _ = done.send(());
                    }
                }
                QueueMessage::Terminate => break,
            }
        }
    }

    /// Offer a record to the queue under its overflow policy.
    ///
    /// Returns `false` if the policy (or shutdown) dropped the record.
    pub fn post_record(&self, logger: Arc<Logger>, record: LogRecord) -> bool {
        self.queue.enqueue(QueueMessage::Record { logger, record })
    }

    /// Enqueue a flush request and wait for a worker to complete it.
    ///
    /// The wait observes every record the caller enqueued before this call.
    /// With `timeout` set, fails with [`LoggerError::FlushTimeout`] once it
    /// expires; a request dropped by the overflow policy or by teardown fails
    /// with [`LoggerError::FlushDropped`].
    pub fn flush_and_wait(&self, logger: Arc<Logger>, timeout: Option<Duration>) -> Result<()> {
        let (done, wait) = crossbeam_channel::bounded(1);
        let accepted = self.queue.enqueue(QueueMessage::Flush {
            logger,
            done: Some(done),
        });
        if !accepted {
            return Err(LoggerError::FlushDropped);
        }

        match timeout {
            Some(timeout) => wait.recv_timeout(timeout).map_err(|e| match e {
                crossbeam_channel::RecvTimeoutError::Timeout => LoggerError::FlushTimeout(timeout),
                crossbeam_channel::RecvTimeoutError::Disconnected => LoggerError::FlushDropped,
            }),
            None => wait.recv().map_err(|_| LoggerError::FlushDropped),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.queue.policy()
    }

    pub fn metrics(&self) -> &QueueMetrics {
        self.queue.metrics()
    }

    /// Stop accepting new messages, drain everything already queued, and join
    /// every worker. Records accepted before shutdown are never dropped here;
    /// only the overflow policy's own rules may have dropped messages earlier.
    pub fn shutdown(&self) {
        let mut workers = self.workers.lock();
        if workers.is_empty() {
            return;
        }

        self.queue.begin_shutdown();
        // One sentinel per worker; they sit behind all accepted messages, so
        // the queue drains in order before the threads exit.
        for _ in workers.iter() {
            self.queue.post_terminate();
        }
        for handle in workers.drain(..) {
            if handle.join().is_err() {
                eprintln!("[LOGGER ERROR] worker thread panicked during shutdown");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::{AtomicLevel, LogLevel};
    use crate::core::sink::Sink;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingSink {
        level: AtomicLevel,
        writes: AtomicU64,
    }

    impl CountingSink {
        fn new() -> Self {
            Self {
                level: AtomicLevel::new(LogLevel::Trace),
                writes: AtomicU64::new(0),
            }
        }
    }

    impl Sink for CountingSink {
        fn write(&self, _record: &LogRecord) -> Result<()> {
            self.writes.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn set_level(&self, level: LogLevel) {
            self.level.store(level);
        }

        fn level(&self) -> LogLevel {
            self.level.load()
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn async_logger(pool: &Arc<WorkerPool>, sink: Arc<CountingSink>) -> Arc<Logger> {
        Logger::with_pool("pool-test", vec![sink as _], Some(Arc::clone(pool)))
    }

    #[test]
    fn test_records_reach_sink_through_pool() {
        let pool = WorkerPool::new(64, OverflowPolicy::Block, 1);
        let sink = Arc::new(CountingSink::new());
        let logger = async_logger(&pool, Arc::clone(&sink));

        for i in 0..10 {
            logger.info(format!("message {}", i));
        }
        logger.flush().expect("flush should complete");

        assert_eq!(sink.writes.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_multi_worker_pool_drains_on_shutdown() {
        let pool = WorkerPool::new(64, OverflowPolicy::Block, 4);
        let sink = Arc::new(CountingSink::new());
        let logger = async_logger(&pool, Arc::clone(&sink));

        for i in 0..100 {
            logger.info(format!("message {}", i));
        }
        pool.shutdown();

        assert_eq!(sink.writes.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn test_shutdown_drains_accepted_records() {
        let pool = WorkerPool::new(64, OverflowPolicy::Block, 1);
        let sink = Arc::new(CountingSink::new());
        let logger = async_logger(&pool, Arc::clone(&sink));

        for i in 0..25 {
            logger.info(format!("message {}", i));
        }
        pool.shutdown();

        assert_eq!(sink.writes.load(Ordering::Relaxed), 25);
    }

    #[test]
    fn test_flush_after_shutdown_fails() {
        let pool = WorkerPool::new(8, OverflowPolicy::Block, 1);
        let sink = Arc::new(CountingSink::new());
        let logger = async_logger(&pool, Arc::clone(&sink));

        pool.shutdown();
        let result = pool.flush_and_wait(logger, None);
        assert!(matches!(result, Err(LoggerError::FlushDropped)));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let pool = WorkerPool::new(8, OverflowPolicy::Block, 2);
        pool.shutdown();
        pool.shutdown();
    }
}
