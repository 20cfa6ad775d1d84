use super::{Buffer, Builder, Ident};
use crate::dialect::Dialect;
use crate::error::QlResult;
use crate::value::Value;

/// Literal SQL with its own bound values, emitted verbatim.
///
/// Used for whole-statement overrides (`*_by_sql`) and for inline fragments in
/// WHERE/HAVING. The text must use the dialect placeholder for each value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Raw {
    pub query: String,
    pub values: Vec<Value>,
}

impl Raw {
    pub fn new(query: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            query: query.into(),
            values,
        }
    }
}

impl Builder for Raw {
    fn build(&self, _dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        buf.push_sql_with_values(&self.query, self.values.iter().cloned());
        Ok(())
    }
}

/// Raw SQL fragment for syntax the builders do not cover.
///
/// ```ignore
/// let cond = qlkit::expr("`age` BETWEEN ? AND ?", qlkit::values![18, 30]);
/// ```
pub fn expr(query: impl Into<String>, values: Vec<Value>) -> Raw {
    Raw::new(query, values)
}

/// `<expr> AS <alias>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub expr: Ident,
    pub name: String,
}

impl Builder for Alias {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        self.expr.write(dialect, buf);
        buf.push_str(" AS ");
        buf.push_ident(dialect, &self.name);
        Ok(())
    }
}

/// Alias a column, table or subquery.
///
/// ```ignore
/// // SELECT `a1` AS `a2`
/// qlkit::select([qlkit::alias("a1", "a2")]);
/// ```
pub fn alias(expr: impl Into<Ident>, name: impl Into<String>) -> Alias {
    Alias {
        expr: expr.into(),
        name: name.into(),
    }
}
