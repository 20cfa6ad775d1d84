use std::time::Duration;

/// Configuration for statement execution.
///
/// By default statements are interpolated before they reach the driver, there
/// is no slow-query threshold and SQL in event context is cut at 1000 bytes.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Inline bound values into the SQL text before sending it.
    pub interpolate: bool,
    /// Statements at or above this duration emit `qlkit.slow_query`.
    pub slow_query_threshold: Option<Duration>,
    /// Truncate SQL attached to events (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            interpolate: true,
            slow_query_threshold: None,
            max_sql_length: Some(1000),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `?` placeholders with the values instead of interpolated SQL.
    ///
    /// Values that are themselves builders cannot be bound this way and fail
    /// with [`QlError::NotSupported`](crate::QlError::NotSupported).
    pub fn with_placeholders(mut self) -> Self {
        self.interpolate = false;
        self
    }

    /// Inline bound values into the SQL text (the default).
    pub fn with_interpolation(mut self) -> Self {
        self.interpolate = true;
        self
    }

    /// Set the slow query threshold.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Set maximum SQL length attached to events.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in events.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
