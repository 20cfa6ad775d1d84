//! Error types for qlkit

use thiserror::Error;

/// Result type alias for qlkit operations
pub type QlResult<T> = Result<T, QlError>;

/// Boxed error returned by a database driver.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for building, interpolating and running statements
#[derive(Debug, Error)]
pub enum QlError {
    /// Statement has no target table
    #[error("table not specified")]
    TableNotSpecified,

    /// Statement has no columns (SELECT list, INSERT columns or UPDATE SET)
    #[error("column not specified")]
    ColumnNotSpecified,

    /// INSERT has columns but no rows
    #[error("values not specified")]
    ValuesNotSpecified,

    /// Placeholder count does not match the bound values
    #[error("bad argument: query has {placeholders} placeholders but {values} values")]
    PlaceholderMismatch { placeholders: usize, values: usize },

    /// Structurally invalid builder input
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// Value or construct the dialect cannot express
    #[error("not supported: {0}")]
    NotSupported(String),

    /// A driver-value capability failed to produce a value
    #[error("valuer error: {0}")]
    Valuer(String),

    /// Single-row load found nothing
    #[error("not found")]
    NotFound,

    /// Row decode/mapping error
    #[error("decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Driver name has no known dialect
    #[error("unsupported driver: {0}")]
    UnsupportedDriver(String),

    /// Statement failed in the driver
    #[error("exec error: {source} [sql: {sql}]")]
    Exec {
        sql: String,
        args: usize,
        #[source]
        source: DriverError,
    },

    /// Driver failure outside statement execution (begin/commit/rollback)
    #[error("driver error: {0}")]
    Driver(#[source] DriverError),
}

impl QlError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a bad argument error
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument(message.into())
    }

    /// Create a not supported error
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported(message.into())
    }

    /// Create a valuer error
    pub fn valuer(message: impl Into<String>) -> Self {
        Self::Valuer(message.into())
    }

    /// Wrap a driver error raised while running `sql`
    pub fn exec(sql: impl Into<String>, args: usize, source: DriverError) -> Self {
        Self::Exec {
            sql: sql.into(),
            args,
            source,
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if the error was raised while building the statement, before any I/O
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::TableNotSpecified
                | Self::ColumnNotSpecified
                | Self::ValuesNotSpecified
                | Self::BadArgument(_)
        )
    }

    /// Check if the error came from the driver
    pub fn is_driver_error(&self) -> bool {
        matches!(self, Self::Exec { .. } | Self::Driver(_))
    }
}
