//! SELECT builder.

use super::{Buffer, Builder, Clauses, Direction, Ident, Join, JoinType, Order, Raw, Statement};
use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::{QlError, QlResult};
use crate::load;
use crate::row::FromRow;
use crate::session::{Executor, run};
use crate::value::Value;

/// `SELECT ...` builder.
///
/// Clause order is fixed:
/// `SELECT [DISTINCT] cols [FROM table [joins]] [WHERE] [GROUP BY] [HAVING] [ORDER BY] [LIMIT] [OFFSET]`.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    clauses: Clauses,
    distinct: bool,
    columns: Vec<Ident>,
    table: Option<Ident>,
    joins: Vec<Join>,
    group_by: Vec<String>,
    having: Vec<Condition>,
    order: Vec<Order>,
    limit: Option<u64>,
    offset: Option<u64>,
}

/// Start a SELECT of `columns`.
///
/// # Example
/// ```ignore
/// let q = qlkit::select(["id", "name"]).from("users");
/// ```
pub fn select<I, C>(columns: I) -> SelectBuilder
where
    I: IntoIterator<Item = C>,
    C: Into<Ident>,
{
    SelectBuilder::new().columns(columns)
}

/// A SELECT given as raw SQL; every other clause is ignored.
pub fn select_by_sql(query: impl Into<String>, values: Vec<Value>) -> SelectBuilder {
    SelectBuilder {
        clauses: Clauses::from_raw(Raw::new(query, values)),
        ..SelectBuilder::default()
    }
}

impl SelectBuilder {
    /// Create an empty SELECT builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== columns ====================

    /// Append one column (name, alias or subquery).
    pub fn column(mut self, column: impl Into<Ident>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append several columns.
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Ident>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add `DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    // ==================== FROM / JOIN ====================

    /// Set the FROM table (name or subquery).
    pub fn from(mut self, table: impl Into<Ident>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add a join of `kind` on the AND of `on`.
    pub fn join(
        mut self,
        kind: JoinType,
        table: impl Into<Ident>,
        on: impl IntoIterator<Item = Condition>,
    ) -> Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            on: on.into_iter().collect(),
        });
        self
    }

    /// Add `JOIN table ON on`.
    pub fn inner_join(self, table: impl Into<Ident>, on: Condition) -> Self {
        self.join(JoinType::Inner, table, [on])
    }

    /// Add `LEFT JOIN table ON on`.
    pub fn left_join(self, table: impl Into<Ident>, on: Condition) -> Self {
        self.join(JoinType::Left, table, [on])
    }

    /// Add `RIGHT JOIN table ON on`.
    pub fn right_join(self, table: impl Into<Ident>, on: Condition) -> Self {
        self.join(JoinType::Right, table, [on])
    }

    /// Add `FULL JOIN table ON on`.
    pub fn full_join(self, table: impl Into<Ident>, on: Condition) -> Self {
        self.join(JoinType::Full, table, [on])
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Add a WHERE condition (ANDed with the others).
    pub fn and_where(mut self, cond: impl Into<Condition>) -> Self {
        self.clauses.where_conds.push(cond.into());
        self
    }

    /// Add a raw WHERE fragment with `?` placeholders.
    pub fn where_sql(self, query: impl Into<String>, values: Vec<Value>) -> Self {
        self.and_where(Raw::new(query, values))
    }

    /// Append GROUP BY columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add a HAVING condition (ANDed with the others).
    pub fn having(mut self, cond: impl Into<Condition>) -> Self {
        self.having.push(cond.into());
        self
    }

    /// Add a raw HAVING fragment with `?` placeholders.
    pub fn having_sql(self, query: impl Into<String>, values: Vec<Value>) -> Self {
        self.having(Raw::new(query, values))
    }

    // ==================== ORDER BY / LIMIT ====================

    /// Append an ORDER BY column.
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order.push(Order::Column {
            column: column.into(),
            direction,
        });
        self
    }

    /// Append `column ASC`.
    pub fn order_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Asc)
    }

    /// Append `column DESC`.
    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Direction::Desc)
    }

    /// Append a raw ORDER BY expression.
    pub fn order_by_sql(mut self, query: impl Into<String>, values: Vec<Value>) -> Self {
        self.order.push(Order::Expr(Raw::new(query, values)));
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Set LIMIT/OFFSET for a 1-based page number.
    ///
    /// Page 0 is treated as page 1.
    pub fn paginate(self, page: u64, per_page: u64) -> Self {
        let offset = page.saturating_sub(1).saturating_mul(per_page);
        self.limit(per_page).offset(offset)
    }

    // ==================== loading ====================

    /// Run the query and map the first row.
    ///
    /// Returns [`QlError::NotFound`] when no row matches.
    pub async fn load_one<T: FromRow>(&self, executor: &impl Executor) -> QlResult<T> {
        let rows = run::query(executor, self).await?;
        run::report_load(executor, self, &rows, load::load_one(&rows))
    }

    /// Run the query and map the first row, if any.
    pub async fn load_opt<T: FromRow>(&self, executor: &impl Executor) -> QlResult<Option<T>> {
        let rows = run::query(executor, self).await?;
        run::report_load(executor, self, &rows, load::load_opt(&rows))
    }

    /// Run the query and map every row. No rows is an empty `Vec`, not an error.
    pub async fn load_all<T: FromRow>(&self, executor: &impl Executor) -> QlResult<Vec<T>> {
        let rows = run::query(executor, self).await?;
        run::report_load(executor, self, &rows, load::load_all(&rows))
    }

    /// Run the query, append every mapped row to `dest` and return how many were added.
    pub async fn load_into<T: FromRow>(
        &self,
        executor: &impl Executor,
        dest: &mut Vec<T>,
    ) -> QlResult<usize> {
        let rows = run::query(executor, self).await?;
        run::report_load(executor, self, &rows, load::load_into(&rows, dest))
    }

    fn write_clauses(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        buf.push_str("SELECT ");
        if self.distinct {
            buf.push_str("DISTINCT ");
        }
        super::write_ident_list(&self.columns, ", ", dialect, buf);

        if let Some(table) = &self.table {
            buf.push_str(" FROM ");
            table.write(dialect, buf);
            for join in &self.joins {
                join.build(dialect, buf)?;
            }
        }

        self.clauses.write_where(dialect, buf)?;

        if !self.group_by.is_empty() {
            buf.push_str(" GROUP BY ");
            for (i, column) in self.group_by.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                buf.push_ident(dialect, column);
            }
        }

        super::write_conditions(" HAVING ", &self.having, dialect, buf)?;

        if !self.order.is_empty() {
            buf.push_str(" ORDER BY ");
            for (i, order) in self.order.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                order.build(dialect, buf)?;
            }
        }

        if let Some(limit) = self.limit {
            buf.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            buf.push_str(&format!(" OFFSET {offset}"));
        }
        Ok(())
    }
}

impl Builder for SelectBuilder {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        if let Some(raw) = &self.clauses.raw {
            return raw.build(dialect, buf);
        }
        if self.columns.is_empty() {
            return Err(QlError::ColumnNotSpecified);
        }
        match &self.table {
            Some(table) if table.is_blank() => return Err(QlError::TableNotSpecified),
            // joins need a table to attach to
            None if !self.joins.is_empty() => return Err(QlError::TableNotSpecified),
            _ => {}
        }

        let mut out = Buffer::new();
        self.write_clauses(dialect, &mut out)?;
        buf.append(out);
        Ok(())
    }

    fn is_subquery(&self) -> bool {
        true
    }
}

impl Statement for SelectBuilder {
    fn kind(&self) -> &'static str {
        "select"
    }
}
