//! Statement builders.
//!
//! Every node (statements, conditions, joins, raw fragments) implements
//! [`Builder`] and renders itself into a shared [`Buffer`]: SQL text plus the
//! ordered values bound to each placeholder written along the way.
//!
//! ```ignore
//! use qlkit::{select, eq, dialect::MYSQL, Builder};
//!
//! let q = select(["id", "name"])
//!     .from("users")
//!     .and_where(eq("status", "active"))
//!     .limit(10)
//!     .to_query(&MYSQL)?;
//! assert_eq!(q.sql, "SELECT `id`, `name` FROM `users` WHERE (`status` = ?) LIMIT 10");
//! ```

mod delete;
mod insert;
mod join;
mod order;
mod raw;
mod select;
mod traits;
mod update;

pub use delete::{DeleteBuilder, delete_by_sql, delete_from};
pub use insert::{InsertBuilder, insert_by_sql, insert_into};
pub use join::{Join, JoinType};
pub use order::{Direction, Order};
pub use raw::{Alias, Raw, alias, expr};
pub use select::{SelectBuilder, select, select_by_sql};
pub use traits::{Mutation, Statement};
pub use update::{UpdateBuilder, update, update_by_sql};

use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::QlResult;
use crate::interpolate::interpolate;
use crate::value::Value;
use std::fmt::Debug;

/// A node that renders itself as SQL for a dialect.
pub trait Builder: Debug + Send + Sync {
    /// Append this node's SQL and bound values to `buf`.
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()>;

    /// Whether the node is a full query that must be parenthesized when
    /// embedded as a value.
    fn is_subquery(&self) -> bool {
        false
    }

    /// Render into a fresh buffer.
    fn to_query(&self, dialect: &dyn Dialect) -> QlResult<BuiltQuery> {
        let mut buf = Buffer::new();
        self.build(dialect, &mut buf)?;
        Ok(buf.into_query())
    }
}

/// Rendered SQL text and the values bound to its placeholders.
///
/// Placeholders and values are written together so the Nth placeholder always
/// corresponds to the Nth value.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    sql: String,
    values: Vec<Value>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal SQL text.
    pub fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    /// Append a quoted identifier.
    pub fn push_ident(&mut self, dialect: &dyn Dialect, name: &str) {
        dialect.write_ident(&mut self.sql, name);
    }

    /// Append one placeholder bound to `value`.
    pub fn push_bind(&mut self, dialect: &dyn Dialect, value: impl Into<Value>) {
        self.sql.push_str(dialect.placeholder());
        self.values.push(value.into());
    }

    /// Append raw SQL together with the values it references.
    pub fn push_sql_with_values(&mut self, sql: &str, values: impl IntoIterator<Item = Value>) {
        self.sql.push_str(sql);
        self.values.extend(values);
    }

    /// Move the contents of `other` to the end of this buffer.
    pub fn append(&mut self, other: Buffer) {
        self.sql.push_str(&other.sql);
        self.values.extend(other.values);
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_query(self) -> BuiltQuery {
        BuiltQuery {
            sql: self.sql,
            values: self.values,
        }
    }
}

/// The result of building a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

impl BuiltQuery {
    /// Inline every bound value as a literal.
    pub fn interpolate(&self, dialect: &dyn Dialect) -> QlResult<String> {
        interpolate(&self.sql, &self.values, dialect)
    }
}

/// A table or column reference: a plain name or any other value.
///
/// Names are written as quoted identifiers. Other values (typically nested
/// builders) are written as one placeholder bound to the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Ident {
    Name(String),
    Value(Value),
}

impl Ident {
    pub(crate) fn write(&self, dialect: &dyn Dialect, buf: &mut Buffer) {
        match self {
            Ident::Name(name) => buf.push_ident(dialect, name),
            Ident::Value(value) => buf.push_bind(dialect, value.clone()),
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Ident::Name(name) if name.is_empty())
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::Name(name.to_string())
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::Name(name)
    }
}

impl From<&String> for Ident {
    fn from(name: &String) -> Self {
        Ident::Name(name.clone())
    }
}

impl From<Value> for Ident {
    fn from(value: Value) -> Self {
        Ident::Value(value)
    }
}

macro_rules! impl_ident_from_builder {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Ident {
                fn from(b: $t) -> Self {
                    Ident::Value(Value::builder(b))
                }
            }

            impl From<$t> for Value {
                fn from(b: $t) -> Self {
                    Value::builder(b)
                }
            }
        )*
    };
}

impl_ident_from_builder!(
    SelectBuilder,
    InsertBuilder,
    UpdateBuilder,
    DeleteBuilder,
    Raw,
    Alias,
    Condition
);

/// Clause state shared by every statement: the raw override and WHERE conditions.
#[derive(Debug, Clone, Default)]
pub(crate) struct Clauses {
    pub(crate) raw: Option<Raw>,
    pub(crate) where_conds: Vec<Condition>,
    pub(crate) build_error: Option<String>,
}

impl Clauses {
    pub(crate) fn from_raw(raw: Raw) -> Self {
        Self {
            raw: Some(raw),
            ..Self::default()
        }
    }

    /// Write ` WHERE <conds>` when the conditions render to something.
    pub(crate) fn write_where(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        write_conditions(" WHERE ", &self.where_conds, dialect, buf)
    }
}

/// Write `keyword` followed by the AND of `conds`, or nothing if they render empty.
pub(crate) fn write_conditions(
    keyword: &str,
    conds: &[Condition],
    dialect: &dyn Dialect,
    buf: &mut Buffer,
) -> QlResult<()> {
    if conds.is_empty() {
        return Ok(());
    }
    let mut inner = Buffer::new();
    Condition::write_group(conds, " AND ", dialect, &mut inner)?;
    if !inner.is_empty() {
        buf.push_str(keyword);
        buf.append(inner);
    }
    Ok(())
}

/// Write `name` idents separated by `, `.
pub(crate) fn write_ident_list<'a>(
    idents: impl IntoIterator<Item = &'a Ident>,
    sep: &str,
    dialect: &dyn Dialect,
    buf: &mut Buffer,
) {
    for (i, ident) in idents.into_iter().enumerate() {
        if i > 0 {
            buf.push_str(sep);
        }
        ident.write(dialect, buf);
    }
}

#[cfg(test)]
mod tests;
