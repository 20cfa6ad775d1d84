//! The execution pipeline shared by every statement.
//!
//! build → interpolate (or bind) → run timed → report.

use super::Executor;
use crate::builder::Statement;
use crate::client::{ExecResult, Runner};
use crate::error::{DriverError, QlError, QlResult};
use crate::monitor::{Kvs, truncate_sql};
use crate::row::Row;
use crate::value::Value;
use std::time::{Duration, Instant};

/// SQL text and arguments ready for the driver.
struct Prepared {
    sql: String,
    args: Vec<Value>,
}

/// Report `err` under `name` and hand it back.
fn report<E: Executor + ?Sized>(executor: &E, name: &str, err: QlError, kvs: &Kvs) -> QlError {
    executor.receiver().event_err_kv(name, &err, kvs);
    err
}

fn sql_kvs<E: Executor + ?Sized>(executor: &E, sql: &str) -> Kvs {
    let mut kvs = Kvs::new();
    kvs.insert(
        "sql".to_string(),
        truncate_sql(sql, executor.config().max_sql_length),
    );
    kvs
}

fn prepare<E, S>(executor: &E, stmt: &S) -> QlResult<Prepared>
where
    E: Executor + ?Sized,
    S: Statement + ?Sized,
{
    let kind = stmt.kind();
    let dialect = executor.dialect();

    let query = stmt
        .to_query(dialect)
        .map_err(|e| report(executor, &format!("qlkit.{kind}.build"), e, &Kvs::new()))?;

    let prepared = if executor.config().interpolate {
        query.interpolate(dialect).map(|sql| Prepared {
            sql,
            args: Vec::new(),
        })
    } else {
        bind_args(&query.values).map(|args| Prepared {
            sql: query.sql.clone(),
            args,
        })
    };

    prepared.map_err(|e| {
        let mut kvs = sql_kvs(executor, &query.sql);
        kvs.insert("args".to_string(), format!("{:?}", query.values));
        report(executor, &format!("qlkit.{kind}.interpolate"), e, &kvs)
    })
}

/// Resolve values for drivers that bind arguments themselves.
fn bind_args(values: &[Value]) -> QlResult<Vec<Value>> {
    fn check(value: &Value) -> QlResult<()> {
        match value {
            Value::Builder(_) => Err(QlError::not_supported(
                "statement values require interpolation",
            )),
            Value::List(items) => items.iter().try_for_each(check),
            _ => Ok(()),
        }
    }

    values
        .iter()
        .map(|value| {
            let resolved = value.resolve()?;
            check(&resolved)?;
            Ok(resolved)
        })
        .collect()
}

/// Report a statement the driver rejected, with the arguments it was sent.
fn driver_failure<E: Executor + ?Sized>(
    executor: &E,
    name: &str,
    sql: String,
    args: &[Value],
    source: DriverError,
) -> QlError {
    let mut kvs = sql_kvs(executor, &sql);
    if !args.is_empty() {
        kvs.insert("args".to_string(), format!("{args:?}"));
    }
    report(executor, name, QlError::exec(sql, args.len(), source), &kvs)
}

fn finish<E: Executor + ?Sized>(executor: &E, kind: &str, sql: &str, elapsed: Duration) {
    let kvs = sql_kvs(executor, sql);
    executor
        .receiver()
        .timing_kv(&format!("qlkit.{kind}"), elapsed, &kvs);

    if let Some(threshold) = executor.config().slow_query_threshold
        && elapsed >= threshold
    {
        executor.receiver().event_kv("qlkit.slow_query", &kvs);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "qlkit.sql",
        kind,
        elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        sql = %kvs.get("sql").map(String::as_str).unwrap_or(sql),
    );
}

/// Run a statement that returns no rows.
pub(crate) async fn exec<E, S>(executor: &E, stmt: &S) -> QlResult<ExecResult>
where
    E: Executor + ?Sized,
    S: Statement + ?Sized,
{
    let kind = stmt.kind();
    let Prepared { sql, args } = prepare(executor, stmt)?;

    let start = Instant::now();
    let result = executor.runner().exec(&sql, &args).await;
    finish(executor, kind, &sql, start.elapsed());

    result.map_err(|source| {
        driver_failure(executor, &format!("qlkit.{kind}.exec"), sql, &args, source)
    })
}

/// Run a query and collect its rows.
pub(crate) async fn query<E, S>(executor: &E, stmt: &S) -> QlResult<Vec<Row>>
where
    E: Executor + ?Sized,
    S: Statement + ?Sized,
{
    let kind = stmt.kind();
    let Prepared { sql, args } = prepare(executor, stmt)?;

    let start = Instant::now();
    let result = executor.runner().query(&sql, &args).await;
    finish(executor, kind, &sql, start.elapsed());

    result.map_err(|source| {
        driver_failure(executor, &format!("qlkit.{kind}.query"), sql, &args, source)
    })
}

/// Report row mapping failures of a finished query.
///
/// `NotFound` is an expected outcome and is passed through silently.
pub(crate) fn report_load<E, S, T>(
    executor: &E,
    stmt: &S,
    rows: &[Row],
    result: QlResult<T>,
) -> QlResult<T>
where
    E: Executor + ?Sized,
    S: Statement + ?Sized,
{
    result.map_err(|err| {
        if err.is_not_found() {
            return err;
        }
        let mut kvs = Kvs::new();
        kvs.insert("rows".to_string(), rows.len().to_string());
        report(executor, &format!("qlkit.{}.load", stmt.kind()), err, &kvs)
    })
}
