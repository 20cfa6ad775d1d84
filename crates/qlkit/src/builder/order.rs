use super::{Buffer, Builder, Raw};
use crate::dialect::Dialect;
use crate::error::QlResult;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    /// `<column> ASC|DESC`
    Column { column: String, direction: Direction },
    /// Raw expression, e.g. `FIELD(id, ?, ?)`.
    Expr(Raw),
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Order::Column {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Order::Column {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

impl Builder for Order {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        match self {
            Order::Column { column, direction } => {
                buf.push_ident(dialect, column);
                buf.push_str(" ");
                buf.push_str(direction.as_sql());
                Ok(())
            }
            Order::Expr(raw) => raw.build(dialect, buf),
        }
    }
}
