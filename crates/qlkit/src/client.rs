//! Driver-facing traits.
//!
//! qlkit never talks to a database directly. A driver adapter implements
//! [`Runner`] (and [`Connector`] for transactions) over its own connection
//! type; everything else in the crate is written against these traits.

use crate::error::DriverError;
use crate::row::Row;
use crate::value::Value;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Number of rows the statement changed.
    pub rows_affected: u64,
    /// Id generated by the last insert, when the driver reports one.
    pub last_insert_id: Option<i64>,
}

/// Something that can run SQL: a connection or a transaction.
///
/// `args` are the values bound to the placeholders in `sql`; when the
/// statement was interpolated the slice is empty.
pub trait Runner: Send + Sync {
    /// Execute a statement that returns no rows.
    fn exec(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = Result<ExecResult, DriverError>> + Send;

    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = Result<Vec<Row>, DriverError>> + Send;
}

/// A connection that can open transactions.
pub trait Connector: Runner {
    type Tx: TxRunner;

    /// Begin a transaction.
    fn begin(&self) -> impl std::future::Future<Output = Result<Self::Tx, DriverError>> + Send;
}

/// An open transaction.
pub trait TxRunner: Runner + Sized {
    fn commit(self) -> impl std::future::Future<Output = Result<(), DriverError>> + Send;

    fn rollback(self) -> impl std::future::Future<Output = Result<(), DriverError>> + Send;
}
