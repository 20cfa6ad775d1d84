//! Instrumentation events for statement execution.
//!
//! Sessions report what they do to an [`EventReceiver`]:
//! - timings for every statement sent to the driver (`qlkit.select`, `qlkit.insert`, ...)
//! - error events for failed steps (`qlkit.select.build`, `qlkit.insert.exec`, ...)
//! - plain events for transaction lifecycle (`qlkit.begin`, `qlkit.commit`, `qlkit.rollback`)
//!
//! Every method has a no-op default, so a receiver only implements what it needs.
//!
//! # Example
//!
//! ```rust,ignore
//! use qlkit::monitor::{CompositeReceiver, StatsReceiver, TracingReceiver};
//! use std::sync::Arc;
//!
//! let stats = Arc::new(StatsReceiver::new());
//! let receiver = CompositeReceiver::new()
//!     .add(TracingReceiver::new())
//!     .add_arc(stats.clone());
//!
//! let conn = Connection::new(driver_conn, &qlkit::dialect::MYSQL).with_receiver(receiver);
//! // ...
//! println!("{:?}", stats.stats());
//! ```

mod receivers;

#[cfg(feature = "tracing")]
mod tracing_receiver;

#[cfg(test)]
mod tests;

use crate::error::QlError;
use std::collections::BTreeMap;
use std::time::Duration;

pub use receivers::{CompositeReceiver, EventStats, NullReceiver, StatsReceiver};

#[cfg(feature = "tracing")]
pub use tracing_receiver::TracingReceiver;

/// Key/value context attached to events (`sql`, `args`, ...).
pub type Kvs = BTreeMap<String, String>;

/// Receiver of instrumentation events.
///
/// The plain variants forward to the `_kv` variants with empty context.
pub trait EventReceiver: Send + Sync {
    /// A named event happened.
    fn event(&self, name: &str) {
        self.event_kv(name, &Kvs::new());
    }

    /// A named event happened, with context.
    fn event_kv(&self, _name: &str, _kvs: &Kvs) {}

    /// A named step failed.
    fn event_err(&self, name: &str, err: &QlError) {
        self.event_err_kv(name, err, &Kvs::new());
    }

    /// A named step failed, with context.
    fn event_err_kv(&self, _name: &str, _err: &QlError, _kvs: &Kvs) {}

    /// A named operation took `elapsed`.
    fn timing(&self, name: &str, elapsed: Duration) {
        self.timing_kv(name, elapsed, &Kvs::new());
    }

    /// A named operation took `elapsed`, with context.
    fn timing_kv(&self, _name: &str, _elapsed: Duration, _kvs: &Kvs) {}
}

/// Build a [`Kvs`] from `(key, value)` pairs.
pub fn kvs<I, K, V>(pairs: I) -> Kvs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Truncate to `max` bytes (on a char boundary) and mark the cut with `...`.
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}
