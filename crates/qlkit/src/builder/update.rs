//! UPDATE builder.

use super::{Buffer, Builder, Clauses, Mutation, Raw, Statement};
use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::{QlError, QlResult};
use crate::value::Value;

/// `UPDATE table SET col = ?, ... [WHERE ...] [LIMIT n]` builder.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    clauses: Clauses,
    table: String,
    set: Vec<(String, Value)>,
    limit: Option<u64>,
}

/// Start an UPDATE of `table`.
///
/// # Example
/// ```ignore
/// let q = qlkit::update("users")
///     .set("status", "inactive")
///     .and_where(qlkit::eq("id", 1));
/// ```
pub fn update(table: impl Into<String>) -> UpdateBuilder {
    UpdateBuilder {
        table: table.into(),
        ..UpdateBuilder::default()
    }
}

/// An UPDATE given as raw SQL.
pub fn update_by_sql(query: impl Into<String>, values: Vec<Value>) -> UpdateBuilder {
    UpdateBuilder {
        clauses: Clauses::from_raw(Raw::new(query, values)),
        ..UpdateBuilder::default()
    }
}

impl UpdateBuilder {
    /// Set `column = value`. Setting the same column again replaces its value in place.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.set.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.set.push((column, value)),
        }
        self
    }

    /// Set several columns, in iteration order.
    pub fn set_map<I, S, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        for (column, value) in pairs {
            self = self.set(column, value);
        }
        self
    }

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

impl Builder for UpdateBuilder {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        if let Some(raw) = &self.clauses.raw {
            return raw.build(dialect, buf);
        }
        if self.table.is_empty() {
            return Err(QlError::TableNotSpecified);
        }
        if self.set.is_empty() {
            return Err(QlError::ColumnNotSpecified);
        }
        if self.limit.is_some() && !dialect.supports_mutation_limit() {
            return Err(QlError::not_supported(format!(
                "UPDATE ... LIMIT in {}",
                dialect.name()
            )));
        }

        let mut out = Buffer::new();
        out.push_str("UPDATE ");
        out.push_ident(dialect, &self.table);
        out.push_str(" SET ");
        for (i, (column, value)) in self.set.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_ident(dialect, column);
            out.push_str(" = ");
            out.push_bind(dialect, value.clone());
        }
        self.clauses.write_where(dialect, &mut out)?;
        if let Some(limit) = self.limit {
            out.push_str(&format!(" LIMIT {limit}"));
        }
        buf.append(out);
        Ok(())
    }
}

impl Statement for UpdateBuilder {
    fn kind(&self) -> &'static str {
        "update"
    }
}

impl Mutation for UpdateBuilder {}
