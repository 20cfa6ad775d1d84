//! # qlkit
//!
//! A dialect-aware SQL statement builder for MySQL and PostgreSQL.
//!
//! ## Features
//!
//! - **Fluent builders**: SELECT, INSERT, UPDATE and DELETE with conditions, joins and ordering
//! - **Dialect rendering**: identifiers, strings, booleans, times and blobs quoted per database
//! - **Interpolation**: bound values (including nested subqueries) inlined as safe literals
//! - **Row mapping**: rows → structs, tuples or scalars via `FromRow`
//! - **Instrumentation**: events and timings for every statement via `EventReceiver`
//!
//! qlkit does not ship a database driver. Implement [`Runner`] (and
//! [`Connector`] for transactions) for your connection type and wrap it in a
//! [`Connection`].
//!
//! ## Building statements
//!
//! ```ignore
//! use qlkit::prelude::*;
//!
//! let q = select(["a", "b"])
//!     .distinct()
//!     .from("table")
//!     .left_join("table2", on("table.a1", "table.a2"))
//!     .and_where(eq("c", 1))
//!     .order_desc("d")
//!     .limit(3)
//!     .to_query(&MYSQL)?;
//!
//! let sql = q.interpolate(&MYSQL)?;
//! ```
//!
//! ## Running statements
//!
//! ```ignore
//! let conn = Connection::open("postgres", driver_conn)?;
//! let sess = conn.new_session(None);
//!
//! update("users").set("status", "inactive").and_where(eq("id", 7)).exec(&sess).await?;
//!
//! let users: Vec<User> = select(["id", "name"]).from("users").load_all(&sess).await?;
//! ```

extern crate self as qlkit;

pub mod builder;
pub mod client;
pub mod condition;
pub mod dialect;
pub mod error;
pub mod interpolate;
pub mod load;
pub mod monitor;
pub mod prelude;
pub mod record;
pub mod row;
pub mod session;
pub mod value;

pub use builder::{
    Alias, Buffer, Builder, BuiltQuery, DeleteBuilder, Direction, Ident, InsertBuilder, Join,
    JoinType, Mutation, Order, Raw, SelectBuilder, Statement, UpdateBuilder, alias, delete_by_sql,
    delete_from, expr, insert_by_sql, insert_into, select, select_by_sql, update, update_by_sql,
};
pub use client::{Connector, ExecResult, Runner, TxRunner};
pub use condition::{CompareOp, Condition, and, eq, gt, gte, lt, lte, neq, on, or};
pub use dialect::{Dialect, MYSQL, MySql, POSTGRES, Postgres};
pub use error::{DriverError, QlError, QlResult};
pub use interpolate::interpolate;
pub use monitor::{
    CompositeReceiver, EventReceiver, EventStats, Kvs, NullReceiver, StatsReceiver,
};
pub use record::{AssignId, Record};
pub use row::{FromRow, FromValue, Row};
pub use session::{Connection, Executor, Session, SessionConfig, Tx};
pub use value::{Json, Valuer, Value};

#[cfg(feature = "tracing")]
pub use monitor::TracingReceiver;

#[cfg(feature = "derive")]
pub use qlkit_derive::{FromRow, Record};
