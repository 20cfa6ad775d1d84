use super::{EventReceiver, Kvs};
use crate::error::QlError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A receiver that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReceiver;

impl EventReceiver for NullReceiver {}

/// A receiver that keeps execution statistics.
#[derive(Debug, Default)]
pub struct StatsReceiver {
    events: AtomicU64,
    errors: AtomicU64,
    timings: AtomicU64,
    slow_queries: AtomicU64,
    total_duration_nanos: AtomicU64,
    max_duration_nanos: AtomicU64,
    select_count: AtomicU64,
    insert_count: AtomicU64,
    update_count: AtomicU64,
    delete_count: AtomicU64,
    slowest: Mutex<Option<String>>,
    last_error: Mutex<Option<String>>,
}

/// Snapshot of [`StatsReceiver`] counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStats {
    /// Plain events (transactions, slow queries).
    pub events: u64,
    /// Error events.
    pub errors: u64,
    /// Timed statements.
    pub timings: u64,
    /// `qlkit.slow_query` events.
    pub slow_queries: u64,
    /// Total time of timed statements.
    pub total_duration: Duration,
    /// Slowest timed statement.
    pub max_duration: Duration,
    pub select_count: u64,
    pub insert_count: u64,
    pub update_count: u64,
    pub delete_count: u64,
    /// SQL of the slowest timed statement.
    pub slowest_sql: Option<String>,
    /// Name and message of the last error event.
    pub last_error: Option<String>,
}

impl StatsReceiver {
    /// Create a new stats receiver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    pub fn stats(&self) -> EventStats {
        EventStats {
            events: self.events.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            timings: self.timings.load(Ordering::Relaxed),
            slow_queries: self.slow_queries.load(Ordering::Relaxed),
            total_duration: Duration::from_nanos(self.total_duration_nanos.load(Ordering::Relaxed)),
            max_duration: Duration::from_nanos(self.max_duration_nanos.load(Ordering::Relaxed)),
            select_count: self.select_count.load(Ordering::Relaxed),
            insert_count: self.insert_count.load(Ordering::Relaxed),
            update_count: self.update_count.load(Ordering::Relaxed),
            delete_count: self.delete_count.load(Ordering::Relaxed),
            slowest_sql: self
                .slowest
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            last_error: self
                .last_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    /// Reset all statistics.
    pub fn reset(&self) {
        for counter in [
            &self.events,
            &self.errors,
            &self.timings,
            &self.slow_queries,
            &self.total_duration_nanos,
            &self.max_duration_nanos,
            &self.select_count,
            &self.insert_count,
            &self.update_count,
            &self.delete_count,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        *self.slowest.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl EventReceiver for StatsReceiver {
    fn event_kv(&self, name: &str, _kvs: &Kvs) {
        self.events.fetch_add(1, Ordering::Relaxed);
        if name == "qlkit.slow_query" {
            self.slow_queries.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn event_err_kv(&self, name: &str, err: &QlError, _kvs: &Kvs) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(format!("{name}: {err}"));
    }

    fn timing_kv(&self, name: &str, elapsed: Duration, kvs: &Kvs) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);

        self.timings.fetch_add(1, Ordering::Relaxed);
        let prev_total = self.total_duration_nanos.fetch_add(nanos, Ordering::Relaxed);
        if prev_total.checked_add(nanos).is_none() {
            // Saturate instead of wrapping on overflow.
            self.total_duration_nanos.store(u64::MAX, Ordering::Relaxed);
        }

        let counter = match name.strip_prefix("qlkit.") {
            Some("select") => Some(&self.select_count),
            Some("insert") => Some(&self.insert_count),
            Some("update") => Some(&self.update_count),
            Some("delete") => Some(&self.delete_count),
            _ => None,
        };
        if let Some(counter) = counter {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        // Update max duration + slowest SQL only when we actually become the new max.
        let mut current_max = self.max_duration_nanos.load(Ordering::Relaxed);
        while nanos > current_max {
            match self.max_duration_nanos.compare_exchange_weak(
                current_max,
                nanos,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    *self.slowest.lock().unwrap_or_else(PoisonError::into_inner) =
                        kvs.get("sql").cloned();
                    break;
                }
                Err(updated) => current_max = updated,
            }
        }
    }
}

/// A receiver that forwards every event to several receivers, in order.
#[derive(Default)]
pub struct CompositeReceiver {
    receivers: Vec<Arc<dyn EventReceiver>>,
}

impl CompositeReceiver {
    /// Create an empty composite receiver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a receiver.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: EventReceiver + 'static>(mut self, receiver: R) -> Self {
        self.receivers.push(Arc::new(receiver));
        self
    }

    /// Add an Arc-wrapped receiver.
    pub fn add_arc(mut self, receiver: Arc<dyn EventReceiver>) -> Self {
        self.receivers.push(receiver);
        self
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }
}

impl std::fmt::Debug for CompositeReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeReceiver")
            .field("receivers", &self.receivers.len())
            .finish()
    }
}

impl EventReceiver for CompositeReceiver {
    fn event_kv(&self, name: &str, kvs: &Kvs) {
        for receiver in &self.receivers {
            receiver.event_kv(name, kvs);
        }
    }

    fn event_err_kv(&self, name: &str, err: &QlError, kvs: &Kvs) {
        for receiver in &self.receivers {
            receiver.event_err_kv(name, err, kvs);
        }
    }

    fn timing_kv(&self, name: &str, elapsed: Duration, kvs: &Kvs) {
        for receiver in &self.receivers {
            receiver.timing_kv(name, elapsed, kvs);
        }
    }
}
