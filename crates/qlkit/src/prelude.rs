//! Convenient imports for typical `qlkit` usage.
//!
//! ```ignore
//! use qlkit::prelude::*;
//! ```

pub use crate::{
    Builder, Condition, Connection, Dialect, Direction, Executor, FromRow, FromValue, JoinType, Json,
    Mutation, QlError, QlResult, Record, Row, Session, SessionConfig, Tx, Value, alias, and,
    delete_from, eq, expr, gt, gte, insert_into, lt, lte, neq, on, or, select, update, values,
};

pub use crate::dialect::{MYSQL, POSTGRES};
