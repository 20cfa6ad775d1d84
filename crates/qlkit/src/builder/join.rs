use super::{Buffer, Builder, Ident};
use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::QlResult;

/// Kind of JOIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// Plain `JOIN`.
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    fn keyword(self) -> &'static str {
        match self {
            JoinType::Inner => " JOIN ",
            JoinType::Left => " LEFT JOIN ",
            JoinType::Right => " RIGHT JOIN ",
            JoinType::Full => " FULL JOIN ",
        }
    }
}

/// ` [LEFT |RIGHT |FULL ]JOIN <table> ON <conditions>`
///
/// The ON clause is the AND of `on`; it is left out when nothing renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinType,
    pub table: Ident,
    pub on: Vec<Condition>,
}

impl Builder for Join {
    fn build(&self, dialect: &dyn Dialect, buf: &mut Buffer) -> QlResult<()> {
        buf.push_str(self.kind.keyword());
        self.table.write(dialect, buf);
        super::write_conditions(" ON ", &self.on, dialect, buf)
    }
}
