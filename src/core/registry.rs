//! Process-wide logger directory and default-logger indirection
//!
//! The registry owns the name → logger directory, the default-logger slot,
//! the shared worker pool used by every asynchronous logger, and the global
//! policy knobs applied to loggers created through its factory path.
//!
//! Registries are ordinary values: tests construct independent instances with
//! [`Registry::new`], while the free-function surface of the crate goes
//! through the single [`Registry::global`] instance.

use super::{
    error::{LoggerError, Result},
    log_level::{AtomicLevel, LogLevel},
    logger::Logger,
    queue::OverflowPolicy,
    sink::SinkHandle,
    worker_pool::WorkerPool,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Registry> = OnceLock::new();
static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

pub struct Registry {
    /// Distinguishes thread-local default slots of independent registries.
    id: u64,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    default_slot: DefaultSlot,
    pool: Mutex<Option<Arc<WorkerPool>>>,
    global_level: AtomicLevel,
    global_flush_level: AtomicLevel,
    automatic_registration: AtomicBool,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            loggers: RwLock::new(HashMap::new()),
            default_slot: DefaultSlot::new(),
            pool: Mutex::new(None),
            global_level: AtomicLevel::new(LogLevel::Info),
            global_flush_level: AtomicLevel::new(LogLevel::Off),
            automatic_registration: AtomicBool::new(true),
        }
    }

    /// The process-wide registry used by the crate's free functions.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Construct a synchronous logger through the factory path.
    ///
    /// Fails with [`LoggerError::DuplicateLogger`] when automatic registration
    /// is enabled and the name is already present. The registry's global level
    /// and flush level are applied either way.
    pub fn create(&self, name: impl Into<String>, sinks: Vec<SinkHandle>) -> Result<Arc<Logger>> {
        self.build_logger(name.into(), sinks, None)
    }

    /// Construct an asynchronous logger backed by the shared worker pool,
    /// creating the pool with defaults if it does not exist yet.
    pub fn create_async(
        &self,
        name: impl Into<String>,
        sinks: Vec<SinkHandle>,
    ) -> Result<Arc<Logger>> {
        let pool = self.worker_pool();
        self.build_logger(name.into(), sinks, Some(pool))
    }

    fn build_logger(
        &self,
        name: String,
        sinks: Vec<SinkHandle>,
        pool: Option<Arc<WorkerPool>>,
    ) -> Result<Arc<Logger>> {
        let logger = Logger::with_pool(name, sinks, pool);
        logger.set_level(self.global_level.load());
        logger.set_flush_level(self.global_flush_level.load());

        if self.automatic_registration.load(Ordering::Relaxed) {
            let mut loggers = self.loggers.write();
            if loggers.contains_key(logger.name()) {
                return Err(LoggerError::DuplicateLogger(logger.name().to_string()));
            }
            loggers.insert(logger.name().to_string(), Arc::clone(&logger));
        }
        Ok(logger)
    }

    /// Insert a logger unconditionally, replacing any prior entry with the
    /// same name. Unlike the factory path this never fails.
    pub fn register_logger(&self, logger: Arc<Logger>) {
        self.loggers
            .write()
            .insert(logger.name().to_string(), logger);
    }

    /// Thread-safe lookup; absence is a valid result, never an error.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    /// Remove one entry; a no-op when absent. If the removed logger is the
    /// current default logger, the default slot is cleared as well.
    pub fn drop(&self, name: &str) {
        let removed = self.loggers.write().remove(name);
        if removed.is_some() {
            if let Some(default) = self.default_slot.get(self.id) {
                if default.name() == name {
                    self.default_slot.clear(self.id);
                }
            }
        }
    }

    /// Empty the directory and clear the default-logger slot.
    ///
    /// In per-thread default mode only the calling thread's slot is cleared;
    /// other threads' slots live in their own thread-local storage.
    pub fn drop_all(&self) {
        self.loggers.write().clear();
        self.default_slot.clear(self.id);
    }

    /// Visit every logger registered at call time, exactly once each.
    ///
    /// The handle set is snapshotted under the read lock and visited outside
    /// it, so a concurrent `drop` is never observed mid-iteration and a slow
    /// visitor never stalls lookups.
    pub fn apply_all<F: FnMut(&Arc<Logger>)>(&self, mut visitor: F) {
        let snapshot: Vec<Arc<Logger>> = self.loggers.read().values().cloned().collect();
        for logger in &snapshot {
            visitor(logger);
        }
    }

    pub fn default_logger(&self) -> Option<Arc<Logger>> {
        self.default_slot.get(self.id)
    }

    /// Replace the default-logger slot; `None` clears it without touching the
    /// directory.
    pub fn set_default_logger(&self, logger: Option<Arc<Logger>>) {
        match logger {
            Some(logger) => self.default_slot.set(self.id, logger),
            None => self.default_slot.clear(self.id),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.global_level.load()
    }

    /// Update the global level and propagate it to every registered logger.
    /// Loggers created afterward inherit the new value at creation time.
    pub fn set_level(&self, level: LogLevel) {
        self.global_level.store(level);
        let snapshot: Vec<Arc<Logger>> = self.loggers.read().values().cloned().collect();
        for logger in snapshot {
            logger.set_level(level);
        }
    }

    pub fn flush_level(&self) -> LogLevel {
        self.global_flush_level.load()
    }

    /// Update the global flush-on level and propagate it to every registered
    /// logger.
    pub fn set_flush_level(&self, level: LogLevel) {
        self.global_flush_level.store(level);
        let snapshot: Vec<Arc<Logger>> = self.loggers.read().values().cloned().collect();
        for logger in snapshot {
            logger.set_flush_level(level);
        }
    }

    pub fn automatic_registration(&self) -> bool {
        self.automatic_registration.load(Ordering::Relaxed)
    }

    /// Toggle the factory path's auto-insert behavior. No retroactive effect
    /// on already-registered loggers.
    pub fn set_automatic_registration(&self, enabled: bool) {
        self.automatic_registration.store(enabled, Ordering::Relaxed);
    }

    /// The shared worker pool, created lazily with defaults on first use.
    pub fn worker_pool(&self) -> Arc<WorkerPool> {
        let mut slot = self.pool.lock();
        match slot.as_ref() {
            Some(pool) => Arc::clone(pool),
            None => {
                let pool = WorkerPool::with_defaults();
                *slot = Some(Arc::clone(&pool));
                pool
            }
        }
    }

    /// Replace the shared worker pool with one of the given configuration.
    ///
    /// Call before creating asynchronous loggers: loggers already holding the
    /// previous pool keep using it.
    pub fn init_worker_pool(
        &self,
        queue_capacity: usize,
        policy: OverflowPolicy,
        worker_count: usize,
    ) -> Arc<WorkerPool> {
        let pool = WorkerPool::new(queue_capacity, policy, worker_count);
        *self.pool.lock() = Some(Arc::clone(&pool));
        pool
    }

    /// Deterministic teardown: clear the directory and default slot, then
    /// drain and join the shared worker pool. Records accepted before this
    /// call are written before it returns.
    pub fn shutdown(&self) {
        self.drop_all();
        let pool = self.pool.lock().take();
        if let Some(pool) = pool {
            pool.shutdown();
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(feature = "per-thread-default"))]
use global_slot::DefaultSlot;

#[cfg(not(feature = "per-thread-default"))]
mod global_slot {
    use super::*;

    /// One process-wide default-logger slot, visible to every thread.
    /// Independently synchronized so reads never contend with directory
    /// operations.
    pub(super) struct DefaultSlot(RwLock<Option<Arc<Logger>>>);

    impl DefaultSlot {
        pub(super) fn new() -> Self {
            Self(RwLock::new(None))
        }

        pub(super) fn get(&self, _registry_id: u64) -> Option<Arc<Logger>> {
            self.0.read().clone()
        }

        pub(super) fn set(&self, _registry_id: u64, logger: Arc<Logger>) {
            *self.0.write() = Some(logger);
        }

        pub(super) fn clear(&self, _registry_id: u64) {
            *self.0.write() = None;
        }
    }
}

#[cfg(feature = "per-thread-default")]
use thread_slot::DefaultSlot;

#[cfg(feature = "per-thread-default")]
mod thread_slot {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static THREAD_DEFAULTS: RefCell<HashMap<u64, Arc<Logger>>> =
            RefCell::new(HashMap::new());
    }

    /// Thread-scoped default-logger slot: a thread that never set a default
    /// observes none, regardless of what other threads installed. Keyed by
    /// registry id so independent registries stay independent.
    pub(super) struct DefaultSlot;

    impl DefaultSlot {
        pub(super) fn new() -> Self {
            DefaultSlot
        }

        pub(super) fn get(&self, registry_id: u64) -> Option<Arc<Logger>> {
            THREAD_DEFAULTS.with(|slots| slots.borrow().get(&registry_id).cloned())
        }

        pub(super) fn set(&self, registry_id: u64, logger: Arc<Logger>) {
            THREAD_DEFAULTS.with(|slots| {
                slots.borrow_mut().insert(registry_id, logger);
            });
        }

        pub(super) fn clear(&self, registry_id: u64) {
            THREAD_DEFAULTS.with(|slots| {
                slots.borrow_mut().remove(&registry_id);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_logger(name: &str) -> Arc<Logger> {
        Logger::new(name, Vec::new())
    }

    #[test]
    fn test_create_then_get() {
        let registry = Registry::new();
        let logger = registry
            .create("net", Vec::new())
            .expect("first create must succeed");

        let found = registry.get("net").expect("logger should be registered");
        assert!(Arc::ptr_eq(&logger, &found));
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let registry = Registry::new();
        registry
            .create("net", Vec::new())
            .expect("first create must succeed");

        let err = registry
            .create("net", Vec::new())
            .expect_err("second create must fail");
        assert!(matches!(err, LoggerError::DuplicateLogger(_)));
    }

    #[test]
    fn test_register_logger_overwrites() {
        let registry = Registry::new();
        registry.register_logger(named_logger("net"));
        let replacement = named_logger("net");
        registry.register_logger(Arc::clone(&replacement));

        let found = registry.get("net").expect("logger should be registered");
        assert!(Arc::ptr_eq(&replacement, &found));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let registry = Registry::new();
        assert!(registry.get("nobody").is_none());
    }

    #[test]
    fn test_global_levels_applied_at_creation() {
        let registry = Registry::new();
        registry.set_level(LogLevel::Warn);
        registry.set_flush_level(LogLevel::Error);

        let logger = registry
            .create("net", Vec::new())
            .expect("create must succeed");
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.flush_level(), LogLevel::Error);
    }

    #[test]
    fn test_set_level_propagates_to_registered() {
        let registry = Registry::new();
        let logger = registry
            .create("net", Vec::new())
            .expect("create must succeed");

        registry.set_level(LogLevel::Fatal);
        assert_eq!(logger.level(), LogLevel::Fatal);
    }

    #[test]
    fn test_worker_pool_is_shared() {
        let registry = Registry::new();
        let first = registry.worker_pool();
        let second = registry.worker_pool();
        assert!(Arc::ptr_eq(&first, &second));
        registry.shutdown();
    }
}
