//! Trait definitions for executable statements.

use super::Builder;
use crate::client::ExecResult;
use crate::error::QlResult;
use crate::session::{Executor, run};

/// A top-level statement that can be sent to a database.
pub trait Statement: Builder {
    /// Operation name used in event names (`qlkit.<kind>`).
    fn kind(&self) -> &'static str;
}

/// Statements that modify rows (INSERT/UPDATE/DELETE).
pub trait Mutation: Statement + Sized {
    /// Execute and return the affected row count and generated id.
    fn exec(
        &self,
        executor: &impl Executor,
    ) -> impl std::future::Future<Output = QlResult<ExecResult>> + Send {
        async move { run::exec(executor, self).await }
    }
}
