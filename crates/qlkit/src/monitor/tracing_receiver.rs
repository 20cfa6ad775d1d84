use super::{EventReceiver, Kvs, truncate_sql};
use crate::error::QlError;
use std::time::Duration;
use tracing::Level;

/// A `tracing`-based receiver.
///
/// Timings and plain events are emitted at [`level`](Self::level) under the
/// `qlkit.sql` target. Error events are always emitted at `ERROR`.
///
/// Enable via the crate feature: `qlkit = { features = ["tracing"] }` (on by default).
#[derive(Debug, Clone)]
pub struct TracingReceiver {
    /// Tracing event level for timings and plain events.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingReceiver {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingReceiver {
    /// Create a new receiver with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn sql(&self, kvs: &Kvs) -> Option<String> {
        kvs.get("sql").map(|sql| truncate_sql(sql, self.max_sql_length))
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

impl EventReceiver for TracingReceiver {
    fn event_kv(&self, name: &str, kvs: &Kvs) {
        let sql = self.sql(kvs);
        emit_at_level!(
            self.level,
            target: "qlkit.sql",
            event = name,
            sql = sql.as_deref().unwrap_or("-"),
        );
    }

    fn event_err_kv(&self, name: &str, err: &QlError, kvs: &Kvs) {
        let sql = self.sql(kvs);
        tracing::error!(
            target: "qlkit.sql",
            event = name,
            error = %err,
            sql = sql.as_deref().unwrap_or("-"),
        );
    }

    fn timing_kv(&self, name: &str, elapsed: Duration, kvs: &Kvs) {
        let sql = self.sql(kvs);
        emit_at_level!(
            self.level,
            target: "qlkit.sql",
            event = name,
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            sql = sql.as_deref().unwrap_or("-"),
        );
    }
}
