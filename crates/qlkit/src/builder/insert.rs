//! INSERT builder.

use super::{Buffer, Builder, Clauses, Mutation, Raw, Statement};
use crate::client::ExecResult;
use crate::dialect::Dialect;
use crate::error::{QlError, QlResult};
use crate::record::Record;
use crate::session::{Executor, run};
use crate::value::Value;

/// `INSERT INTO table (cols) VALUES (...), (...)` builder.
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    clauses: Clauses,
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Start an INSERT into `table`.
///
/// # Example
/// ```ignore
/// let q = qlkit::insert_into("users")
///     .columns(["name", "email"])
///     .values(qlkit::values!["alice", "alice@example.com"]);
/// ```
pub fn insert_into(table: impl Into<String>) -> InsertBuilder {
    InsertBuilder {
        table: table.into(),
        ..InsertBuilder::default()
    }
}

/// An INSERT given as raw SQL.
pub fn insert_by_sql(query: impl Into<String>, values: Vec<Value>) -> InsertBuilder {
    InsertBuilder {
        clauses: Clauses::from_raw(Raw::new(query, values)),
        ..InsertBuilder::default()
    }
}

impl InsertBuilder {
    /// Set the column list.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one row; its length must match the column list.
    pub fn values(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Append one row read from `record`, one value per column.
    ///
    /// Columns the record does not know bind `NULL`. When no columns were set
    /// yet, the record's own column list is used.
    pub fn record<R: Record + ?Sized>(mut self, record: &R) -> Self {
        if self.columns.is_empty() {
            self.columns = record.columns().iter().map(|c| c.to_string()).collect();
        }
        let row = self
            .columns
            .iter()
            .map(|c| record.column_value(c).unwrap_or(Value::Null))
            .collect();
        self.rows.push(row);
        self
    }

    /// Add one column and its value to a single-row insert.
    pub fn pair(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        if self.rows.len() > 1 {
            self.clauses.build_error = Some("pair() requires a single-row insert".to_string());
            return self;
        }
        self.columns.push(column.into());
        match self.rows.first_mut() {
            Some(row) => row.push(value.into()),
            None => self.rows.push(vec![value.into()]),
        }
        self
    }

    /// Run the insert and store the generated id into `record`.
    pub async fn exec_record<R: Record + ?Sized>(
        &self,
        executor: &impl Executor,
        record: &mut R,
    ) -> QlResult<ExecResult> {
        let result = run::exec(executor, self).await?;
        if let Some(id) = result.last_insert_id {
            record.set_last_insert_id(id);
        }
        Ok(result)
    }

    fn validate(&self) -> QlResult<()> {
        if let Some(err) = &self.clauses.build_error {
            return Err(QlError::bad_argument(err.clone()));
        }
        if self.table.is_empty() {
            return Err(QlError::TableNotSpecified);
        }
        if self.columns.is_empty() {
            return Err(QlError::ColumnNotSpecified);
        }
        if self.rows.is_empty() {
            return Err(QlError::ValuesNotSpecified);
        }
        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.columns.len())
        {
            return Err(QlError::bad_argument(format!(
                "row {i} has {} values for {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        Ok(())
    }
}

impl Builder for InsertBuilder {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        if let Some(raw) = &self.clauses.raw {
            return raw.build(dialect, buf);
        }
        self.validate()?;

        buf.push_str("INSERT INTO ");
        buf.push_ident(dialect, &self.table);
        buf.push_str(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                buf.push_str(",");
            }
            buf.push_ident(dialect, column);
        }
        buf.push_str(") VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            buf.push_str("(");
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    buf.push_str(",");
                }
                buf.push_bind(dialect, value.clone());
            }
            buf.push_str(")");
        }
        Ok(())
    }
}

impl Statement for InsertBuilder {
    fn kind(&self) -> &'static str {
        "insert"
    }
}

impl Mutation for InsertBuilder {}
