//! DELETE builder.

use super::{Buffer, Builder, Clauses, Mutation, Raw, Statement};
use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::{QlError, QlResult};
use crate::value::Value;

/// `DELETE FROM table [WHERE ...] [LIMIT n]` builder.
///
/// Without conditions every row is deleted, exactly as written.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    clauses: Clauses,
    table: String,
    limit: Option<u64>,
}

/// Start a DELETE from `table`.
///
/// # Example
/// ```ignore
/// let q = qlkit::delete_from("users").and_where(qlkit::eq("id", 5));
/// ```
pub fn delete_from(table: impl Into<String>) -> DeleteBuilder {
    DeleteBuilder {
        table: table.into(),
        ..DeleteBuilder::default()
    }
}

/// A DELETE given as raw SQL.
pub fn delete_by_sql(query: impl Into<String>, values: Vec<Value>) -> DeleteBuilder {
    DeleteBuilder {
        clauses: Clauses::from_raw(Raw::new(query, values)),
        ..DeleteBuilder::default()
    }
}

impl DeleteBuilder {
    /// Add a WHERE condition (ANDed with the others).
    pub fn and_where(mut self, cond: impl Into<Condition>) -> Self {
        self.clauses.where_conds.push(cond.into());
        self
    }

    /// Add a raw WHERE fragment with `?` placeholders.
    pub fn where_sql(self, query: impl Into<String>, values: Vec<Value>) -> Self {
        self.and_where(Raw::new(query, values))
    }

    /// Set LIMIT. Only dialects that support it accept the statement.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }
}

impl Builder for DeleteBuilder {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        if let Some(raw) = &self.clauses.raw {
            return raw.build(dialect, buf);
        }
        if self.table.is_empty() {
            return Err(QlError::TableNotSpecified);
        }
        if self.limit.is_some() && !dialect.supports_mutation_limit() {
            return Err(QlError::not_supported(format!(
                "DELETE ... LIMIT in {}",
                dialect.name()
            )));
        }

        let mut out = Buffer::new();
        out.push_str("DELETE FROM ");
        out.push_ident(dialect, &self.table);
        self.clauses.write_where(dialect, &mut out)?;
        if let Some(limit) = self.limit {
            out.push_str(&format!(" LIMIT {limit}"));
        }
        buf.append(out);
        Ok(())
    }
}

impl Statement for DeleteBuilder {
    fn kind(&self) -> &'static str {
        "delete"
    }
}

impl Mutation for DeleteBuilder {}
