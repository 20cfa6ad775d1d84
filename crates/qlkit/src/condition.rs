//! WHERE/HAVING/ON conditions.
//!
//! A [`Condition`] is a small expression tree: AND/OR groups over comparisons,
//! join equalities and raw fragments. Groups wrap every child in parentheses,
//! so precedence never depends on how the tree was assembled.
//!
//! ```ignore
//! use qlkit::{and, or, eq, gt, neq};
//!
//! // (`status` = ?) AND ((`age` > ?) OR (`vip` IS NOT NULL))
//! let cond = and([eq("status", "active"), or([gt("age", 18), neq("vip", None::<bool>)])]);
//! ```

use crate::builder::{Buffer, Builder, Raw};
use crate::dialect::Dialect;
use crate::error::QlResult;
use crate::value::Value;

/// Comparison operator of a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// Condition tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// All children must hold.
    And(Vec<Condition>),
    /// At least one child must hold.
    Or(Vec<Condition>),
    /// `column op ?`. `Eq`/`Neq` special-case `NULL` and lists.
    Compare {
        column: String,
        op: CompareOp,
        value: Value,
    },
    /// `left = right` between two columns, used in JOIN ... ON.
    On { left: String, right: String },
    /// Raw SQL fragment with its own values.
    Expr(Raw),
}

impl Condition {
    /// Render `conds` each in parentheses, separated by `sep`.
    ///
    /// Children rendering to nothing (empty groups) are skipped entirely.
    pub(crate) fn write_group(
        conds: &[Condition],
        sep: &str,
        dialect: &dyn Dialect,
        buf: &mut Buffer,
    ) -> QlResult<()> {
        let mut first = true;
        for cond in conds {
            let mut part = Buffer::new();
            cond.build(dialect, &mut part)?;
            if part.is_empty() {
                continue;
            }
            if !first {
                buf.push_str(sep);
            }
            first = false;
            buf.push_str("(");
            buf.append(part);
            buf.push_str(")");
        }
        Ok(())
    }

    fn write_compare(
        column: &str,
        op: CompareOp,
        value: &Value,
        dialect: &dyn Dialect,
        buf: &mut Buffer,
    ) {
        buf.push_ident(dialect, column);
        match (op, value) {
            (CompareOp::Eq, Value::Null) => buf.push_str(" IS NULL"),
            (CompareOp::Neq, Value::Null) => buf.push_str(" IS NOT NULL"),
            (CompareOp::Eq | CompareOp::Neq, Value::List(items)) => {
                buf.push_str(if op == CompareOp::Eq { " IN (" } else { " NOT IN (" });
                if items.is_empty() {
                    buf.push_str("NULL");
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(",");
                    }
                    buf.push_bind(dialect, item.clone());
                }
                buf.push_str(")");
            }
            _ => {
                buf.push_str(" ");
                buf.push_str(op.as_sql());
                buf.push_str(" ");
                buf.push_bind(dialect, value.clone());
            }
        }
    }
}

impl Builder for Condition {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        match self {
            Condition::And(conds) => Condition::write_group(conds, " AND ", dialect, buf),
            Condition::Or(conds) => Condition::write_group(conds, " OR ", dialect, buf),
            Condition::Compare { column, op, value } => {
                Condition::write_compare(column, *op, value, dialect, buf);
                Ok(())
            }
            Condition::On { left, right } => {
                buf.push_ident(dialect, left);
                buf.push_str(" = ");
                buf.push_ident(dialect, right);
                Ok(())
            }
            Condition::Expr(raw) => raw.build(dialect, buf),
        }
    }
}

impl From<Raw> for Condition {
    fn from(raw: Raw) -> Self {
        Condition::Expr(raw)
    }
}

/// AND of `conds`.
pub fn and(conds: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::And(conds.into_iter().collect())
}

/// OR of `conds`.
pub fn or(conds: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::Or(conds.into_iter().collect())
}

fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Condition {
    Condition::Compare {
        column: column.into(),
        op,
        value: value.into(),
    }
}

/// `column = value`; `IS NULL` for null, `IN (...)` for lists.
pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Eq, value)
}

/// `column != value`; `IS NOT NULL` for null, `NOT IN (...)` for lists.
pub fn neq(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Neq, value)
}

/// `column > value`
pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Gt, value)
}

/// `column >= value`
pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Gte, value)
}

/// `column < value`
pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Lt, value)
}

/// `column <= value`
pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    compare(column, CompareOp::Lte, value)
}

/// `left = right` between two columns.
pub fn on(left: impl Into<String>, right: impl Into<String>) -> Condition {
    Condition::On {
        left: left.into(),
        right: right.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::expr;
    use crate::dialect::{MYSQL, POSTGRES};
    use crate::values;

    fn render(cond: &Condition) -> (String, Vec<Value>) {
        let q = cond.to_query(&MYSQL).unwrap();
        (q.sql, q.values)
    }

    #[test]
    fn test_comparisons() {
        let cases = [
            (eq("a", 1), "`a` = ?"),
            (neq("a", 1), "`a` != ?"),
            (gt("a", 1), "`a` > ?"),
            (gte("a", 1), "`a` >= ?"),
            (lt("a", 1), "`a` < ?"),
            (lte("a", 1), "`a` <= ?"),
        ];
        for (cond, expected) in cases {
            let (sql, values) = render(&cond);
            assert_eq!(sql, expected);
            assert_eq!(values, vec![Value::Int(1)]);
        }
    }

    #[test]
    fn test_null_emits_no_placeholder() {
        assert_eq!(render(&eq("a", None::<i32>)), ("`a` IS NULL".into(), vec![]));
        assert_eq!(render(&neq("a", Value::Null)), ("`a` IS NOT NULL".into(), vec![]));
    }

    #[test]
    fn test_list_expands_to_in() {
        let (sql, values) = render(&eq("a", vec![1, 2, 3]));
        assert_eq!(sql, "`a` IN (?,?,?)");
        assert_eq!(values, values![1, 2, 3]);

        let (sql, values) = render(&neq("a", ["x", "y"]));
        assert_eq!(sql, "`a` NOT IN (?,?)");
        assert_eq!(values, values!["x", "y"]);
    }

    #[test]
    fn test_empty_list_never_matches() {
        assert_eq!(render(&eq("a", Vec::<i64>::new())), ("`a` IN (NULL)".into(), vec![]));
    }

    #[test]
    fn test_groups_parenthesize_children() {
        let cond = and([eq("a", 1), or([eq("b", 2), eq("c", 3)])]);
        let (sql, values) = render(&cond);
        assert_eq!(sql, "(`a` = ?) AND ((`b` = ?) OR (`c` = ?))");
        assert_eq!(values, values![1, 2, 3]);
    }

    #[test]
    fn test_empty_groups_render_nothing() {
        assert_eq!(render(&and([])), (String::new(), vec![]));
        let cond = and([or([]), eq("a", 1), and([])]);
        assert_eq!(render(&cond).0, "(`a` = ?)");
    }

    #[test]
    fn test_on_and_expr() {
        let q = on("t1.id", "t2.t1_id").to_query(&POSTGRES).unwrap();
        assert_eq!(q.sql, "\"t1\".\"id\" = \"t2\".\"t1_id\"");
        assert!(q.values.is_empty());

        let cond: Condition = expr("a BETWEEN ? AND ?", values![1, 5]).into();
        assert_eq!(render(&cond), ("a BETWEEN ? AND ?".into(), values![1, 5]));
    }
}
