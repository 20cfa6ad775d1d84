use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingReceiver {
    events: AtomicUsize,
    errors: AtomicUsize,
    timings: AtomicUsize,
}

impl EventReceiver for CountingReceiver {
    fn event_kv(&self, _: &str, _: &Kvs) {
        self.events.fetch_add(1, Ordering::SeqCst);
    }
    fn event_err_kv(&self, _: &str, _: &QlError, _: &Kvs) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
    fn timing_kv(&self, _: &str, _: Duration, _: &Kvs) {
        self.timings.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_plain_methods_forward_to_kv_variants() {
    let receiver = CountingReceiver::default();
    receiver.event("qlkit.begin");
    receiver.event_err("qlkit.select.build", &QlError::TableNotSpecified);
    receiver.timing("qlkit.select", Duration::from_millis(1));

    assert_eq!(receiver.events.load(Ordering::SeqCst), 1);
    assert_eq!(receiver.errors.load(Ordering::SeqCst), 1);
    assert_eq!(receiver.timings.load(Ordering::SeqCst), 1);
}

#[test]
fn test_null_receiver_accepts_everything() {
    let receiver = NullReceiver;
    receiver.event("x");
    receiver.event_err("x", &QlError::NotFound);
    receiver.timing("x", Duration::ZERO);
}

#[test]
fn test_stats_receiver() {
    let receiver = StatsReceiver::new();
    let fast = kvs([("sql", "SELECT 1")]);
    let slow = kvs([("sql", "SELECT * FROM big")]);

    receiver.timing_kv("qlkit.select", Duration::from_millis(10), &fast);
    receiver.timing_kv("qlkit.select", Duration::from_millis(30), &slow);
    receiver.timing_kv("qlkit.insert", Duration::from_millis(20), &fast);
    receiver.event("qlkit.slow_query");
    receiver.event("qlkit.commit");
    receiver.event_err("qlkit.update.build", &QlError::TableNotSpecified);

    let stats = receiver.stats();
    assert_eq!(stats.timings, 3);
    assert_eq!(stats.select_count, 2);
    assert_eq!(stats.insert_count, 1);
    assert_eq!(stats.update_count, 0);
    assert_eq!(stats.total_duration, Duration::from_millis(60));
    assert_eq!(stats.max_duration, Duration::from_millis(30));
    assert_eq!(stats.slowest_sql.as_deref(), Some("SELECT * FROM big"));
    assert_eq!(stats.events, 2);
    assert_eq!(stats.slow_queries, 1);
    assert_eq!(stats.errors, 1);
    assert_eq!(
        stats.last_error.as_deref(),
        Some("qlkit.update.build: table not specified")
    );

    receiver.reset();
    assert_eq!(receiver.stats(), EventStats::default());
}

#[test]
fn test_stats_receiver_saturates_total_duration() {
    let receiver = StatsReceiver::new();
    receiver.timing("qlkit.select", Duration::from_nanos(u64::MAX));
    receiver.timing("qlkit.select", Duration::from_nanos(5));
    assert_eq!(
        receiver.stats().total_duration,
        Duration::from_nanos(u64::MAX)
    );
}

#[test]
fn test_composite_receiver_fans_out() {
    let a = Arc::new(CountingReceiver::default());
    let b = Arc::new(StatsReceiver::new());
    let composite = CompositeReceiver::new()
        .add_arc(a.clone())
        .add_arc(b.clone())
        .add(NullReceiver);
    assert_eq!(composite.len(), 3);

    composite.timing("qlkit.delete", Duration::from_millis(2));
    composite.event_err("qlkit.delete.exec", &QlError::NotFound);

    assert_eq!(a.timings.load(Ordering::SeqCst), 1);
    assert_eq!(a.errors.load(Ordering::SeqCst), 1);
    assert_eq!(b.stats().delete_count, 1);
    assert_eq!(b.stats().errors, 1);
}

#[test]
fn test_truncate_sql_respects_char_boundaries() {
    assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
    assert_eq!(truncate_sql_bytes("SELECT * FROM users", 10), "SELECT * F");
    // 'é' is two bytes; cutting inside it backs off to the boundary
    assert_eq!(truncate_sql_bytes("é", 1), "");
    assert_eq!(truncate_sql("SELECT * FROM users", Some(10)), "SELECT * F...");
    assert_eq!(truncate_sql("SELECT * FROM users", None), "SELECT * FROM users");
}

#[cfg(feature = "tracing")]
#[test]
fn test_tracing_receiver_builder() {
    let receiver = TracingReceiver::new()
        .level(tracing::Level::INFO)
        .max_sql_length(10);
    assert_eq!(receiver.level, tracing::Level::INFO);
    assert_eq!(receiver.max_sql_length, Some(10));
    assert_eq!(receiver.no_truncate().max_sql_length, None);

    // Emitting without a subscriber is a no-op.
    TracingReceiver::default().timing_kv(
        "qlkit.select",
        Duration::from_millis(1),
        &kvs([("sql", "SELECT 1")]),
    );
}
